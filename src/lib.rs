//! wallet-bridge - Secret-safe command bridge for wallet engines.
//!
//! Takes a command meant for an external wallet engine, appends the storage
//! location and output format, optionally attaches a password or passphrase,
//! runs the engine and returns its output untouched. The secret is wiped as
//! soon as the engine has the command and never shows up in logs.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── call          # Run a command through the engine
//! │   ├── preview       # Print the redacted command
//! │   ├── init          # Write a config file
//! │   ├── show          # Show the effective config
//! │   ├── secret_input  # Prompt / stdin / env secret sources
//! │   ├── settings      # Config file + flag overrides
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── command       # Command builder and assembler
//!     ├── secret/       # Secret lifecycle guard
//!     │   ├── storage   # Wipeable storage trait
//!     │   └── redact    # Positional redaction
//!     ├── engine        # Engine trait, process engine, dispatch
//!     ├── bridge        # Host entry point
//!     └── config        # Versioned options and config file
//! ```
//!
//! # Example
//!
//! ```
//! use wallet_bridge::core::engine::from_fn;
//! use wallet_bridge::core::{Bridge, ConfigOptions};
//!
//! let bridge = Bridge::new(from_fn(|line| Ok(format!("engine saw {} bytes", line.len()))));
//! let config = ConfigOptions::new().with_storage_location("/data/app");
//!
//! let mut secret = b"s3cr3t".to_vec();
//! let output = bridge.call("wallet unlock", &config, Some(&mut secret)).unwrap();
//!
//! assert_eq!(output, "engine saw 58 bytes");
//! assert!(secret.iter().all(|b| *b == 0));
//! ```

pub mod cli;
pub mod core;
pub mod error;
