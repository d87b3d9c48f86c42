// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) parses the arguments, sets up logging and hands over to
// `ui::run`.
//
// Module responsibilities:
// - `rooms`: Expands explicit lists, room files, layout strings and whole
//   buildings into one deduplicated list of room numbers.
// - `api`: Encapsulates HTTP interactions with the laundry backend (admin
//   login, bulk account generation) and their wire types.
// - `preview`: Builds a local dry-run result with random passwords.
// - `output`: Credentials table, summary line and CSV export.
// - `cli` / `config`: Command line flags and the optional config file.
// - `ui`: Terminal flow tying the pieces together (prompts, spinners).
// - `error` / `logging`: Error type with exit codes, tracing setup.
//
// Keeping the room expansion free of I/O makes it easy to test on its own
// and to reuse from other admin tooling.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod preview;
pub mod rooms;
pub mod ui;
