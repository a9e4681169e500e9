// ABOUTME: Library crate for loan-stepper exposing the wizard, UI components and CLI for testing

#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod wizard;
