//! Simple example demonstrating how to use the Symbol Clusters library

use anyhow::Result;
use symbol_clusters::{format_report, scan_path};

fn main() -> Result<()> {
    // Scan a scratch directory with a couple of small sources
    let dir = std::env::temp_dir().join("symbol_clusters_demo");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(
        dir.join("sample.rs"),
        r#"use std::collections::HashMap;

fn main() {
    let mut map: HashMap<&str, u32> = HashMap::new();
    *map.entry("key").or_insert(0) += 1;
    println!("{:?}", map);
}
"#,
    )?;
    std::fs::write(dir.join("sample.py"), "data = {'a': [1, 2], 'b': (3, 4)}\nprint(data['a'][0])\n")?;

    println!("Scanning directory: {}", dir.display());

    let frequencies = scan_path(&dir, &["rs", "py"])?;

    // Top 5 rows per table, combined table included
    println!("{}", format_report(&frequencies, 5, true, false));

    Ok(())
}
