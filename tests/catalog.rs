// Static plugin table loading guard rails.

use anyhow::Result;
use nova_fetch::{CatalogSource, Category, CategoryFlags, Selection, StaticTable};
use serde_json::json;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn bundled_table_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("catalogs/plugins.json")
}

#[test]
fn bundled_table_file_matches_compiled_copy() -> Result<()> {
    let from_disk = StaticTable::load(&bundled_table_path())?;
    let compiled = StaticTable::bundled()?;
    for category in Category::ALL {
        let disk: Vec<_> = from_disk.names(category).collect();
        let built: Vec<_> = compiled.names(category).collect();
        assert_eq!(disk, built, "{category} names differ");
    }
    Ok(())
}

#[test]
fn bundled_table_resolves_default_selection() -> Result<()> {
    let table = StaticTable::bundled()?;
    let catalog = table.resolve(&Selection::from_flags(CategoryFlags::default()));
    assert!(!catalog.entries(Category::Official).is_empty());
    assert!(!catalog.entries(Category::Unofficial).is_empty());
    assert!(catalog.entries(Category::Private).is_empty());
    for entry in catalog.iter() {
        assert_eq!(entry.sources.len(), 1);
        assert_eq!(table.url(entry.category, &entry.name), entry.url());
    }
    Ok(())
}

#[test]
fn table_from_file_with_empty_category() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    serde_json::to_writer(
        &mut file,
        &json!({
            "official": {"eztv.py": "https://example.com/eztv.py"},
            "private": {}
        }),
    )?;
    let table = StaticTable::load(file.path())?;
    let catalog = table.resolve(&Selection::from_categories(Category::ALL));

    assert_eq!(catalog.names(Category::Official), vec!["eztv.py"]);
    let listed: Vec<_> = catalog.categories().collect();
    assert_eq!(listed, Category::ALL.to_vec());
    assert!(catalog.entries(Category::Unofficial).is_empty());
    Ok(())
}

#[test]
fn table_rejects_malformed_json() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    std::io::Write::write_all(&mut file, b"{\"official\": [\"eztv.py\"]}")?;
    let err = StaticTable::load(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("parsing plugin table"));
    Ok(())
}

#[test]
fn missing_table_file_is_an_error() {
    let err = StaticTable::load(&PathBuf::from("/nonexistent/plugins.json")).unwrap_err();
    assert!(format!("{err:#}").contains("opening plugin table"));
}
