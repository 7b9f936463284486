//! UI module - contains reusable UI rendering components

pub mod components;
