//! Write a collection to disk, read it back, and print each entry.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p gobl-state-fs --example persist
//! ```

use chrono::{TimeDelta, Utc};
use gobl_property::{KEY_SHORT_DESC, KEY_USAGE, Properties, Property, PropertyStore};
use gobl_state_fs::{FsStore, FsStoreConfig};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let dir = tempfile::tempdir()?;
    let store = FsStore::with_config(FsStoreConfig {
        root: dir.path().to_path_buf(),
        ..FsStoreConfig::default()
    });

    let mut props = Properties::new();
    props.add(Property::string(KEY_USAGE, "invoice [flags]"));
    props.add(Property::string(KEY_SHORT_DESC, "Build an invoice"));
    props.add(Property::decimal("amount", Decimal::new(125, 1)));
    props.add(Property::duration("timeout", TimeDelta::seconds(90)));
    props.add(Property::datetime("issued", Utc::now()));
    props.add(Property::uint8_array("levels", [10, 20, 30]));

    store.write("invoice:001", &props).await?;
    let back = store
        .read("invoice:001")
        .await?
        .ok_or("collection vanished")?;

    for (key, property) in &back {
        println!("{key:>10} {:<12} {property}", property.kind());
    }
    println!("stored keys: {:?}", store.list("invoice:").await?);
    Ok(())
}
