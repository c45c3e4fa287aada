//! # medpc_extract
//!
//! medpc_extract pulls structured experiment records out of MED-PC session
//! data files and flattens them into a tab-separated table for analysis.
//! MED-PC boxes write one or more sessions per file; each session carries
//! its metadata (box, subject, experiment, group, MSN, start and end time)
//! followed by lettered variables holding binned event timestamps.
//!
//! ## Input format
//!
//! A data file must be formatted as:
//!
//! ```text
//! File: C:\MED-PC IV\Data\!2009-01-31_11h23m.Subject E1_
//!
//!
//! BOX:  1 SUBJECT:      E1_ EXPERIMENT: COCESC_RUNA GROUP:        2 MSN:    1102L
//! START: 01/31/09 11:23:37 END: 01/31/09 17:25:18
//! A:37.00000
//! B:39.00000
//! C:30.00000
//! D:
//!    0: 536.3000 771.1000 1049.400 2435.700 2435.900
//!    5: 2486.300 3050.700 3052.800 4378.400 4396.000
//!   10: 4692.400 5588.500 5613.800 5618.700 5621.400
//! ```
//!
//! Every record begins with a `File:` marker line. The header labels may
//! share a line in any order. A variable is either a single inline value
//! (`A:37.00000`) or a label followed by indented bin rows of up to five
//! timestamps each, the bin index giving the position of its first value.
//! A variable section ends at the next label, the next `File:` marker, or
//! the end of the file.
//!
//! ## Output
//!
//! One tab-separated row per record: box, subject, experiment, group, MSN,
//! start, end, and a final column packing the variables as
//! `A=37;D=536.3,771.1,...`. Header fields that could not be scanned are
//! written as `NA`. In `append` mode an existing output file is preserved
//! and extended; in `write` mode it is replaced.
//!
//! Malformed content degrades only itself: a bin row with a bad index is
//! dropped, a bad timestamp token is skipped, a missing header label leaves
//! its column as `NA`. Each such recovery is logged as a warning and counted
//! in the run summary. Only an unreadable input or unwritable output aborts
//! a run.
//!
//! ## Configuration
//!
//! Runs are configured with a YAML file:
//!
//! ```yml
//! data_path: /path/to/session.txt
//! output_path: /path/to/session.tsv
//! mode: write   # or: append
//! ```
//!
//! ## Install
//!
//! Install the CLI with `cargo install --path ./medpc_extract_cli` from the
//! top level of the repository. Use `medpc_extract_cli -p config.yml new`
//! to write a template configuration and
//! `medpc_extract_cli -p config.yml` to run an extraction.
pub mod anomaly;
pub mod block_decoder;
pub mod config;
pub mod data_file;
pub mod error;
pub mod process;
pub mod record;
pub mod record_builder;
pub mod scanner;
pub mod table_writer;
