// PostgreSQL module - a `Cursor` over tokio-postgres results
//
// This module is split into two sub-modules:
// - cursor: the `Cursor` implementation over text-protocol rows
// - text: conversion of text-protocol cells into native values

pub mod cursor;
pub mod text;

// Re-export the public API
pub use cursor::SimpleQueryCursor;
pub use text::native_from_text;
