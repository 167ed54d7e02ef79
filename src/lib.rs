//! world_ranks
//!
//! A small Rust library for listing countries from the REST Countries API,
//! filtered by region and status, searched by name, and ranked by population or
//! area. Pairs with the `world-ranks` CLI.
//!
//! ### Features
//! - Fetch all countries or a single region, validated into typed records
//! - Filter to independent states and/or UN members, search by name
//! - Rank by population or area with locale-formatted display values
//! - Track the latest request so stale responses never replace newer ones
//! - Save the ranked view as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use world_ranks::{Client, Region, SortKey, ViewOptions};
//!
//! let client = Client::default();
//! let options = ViewOptions::default()
//!     .with_region(Region::Europe)
//!     .with_un_member_only(true)
//!     .with_sort_key(SortKey::Area);
//! let view = world_ranks::build_view(&client, &options, "en")?;
//! print!("{}", world_ranks::render::render_table(&view, 80));
//! world_ranks::storage::save_csv(&view, "europe_by_area.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod error;
pub mod format;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod storage;

pub use api::{Client, DataSource};
pub use error::FetchError;
pub use models::{RawCountry, Region, SortKey, ViewCountry, ViewOptions};
pub use pipeline::{build_view, shape};
pub use session::{Completion, ViewSession};
