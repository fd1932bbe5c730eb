//! Inventory table output

use crate::resource::{Inventory, SingleResource};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

/// Column headers, in display order
pub const HEADERS: [&str; 4] = ["Region", "Service", "Product", "ID"];

/// Display cells for one record; a missing product is an empty string
pub fn row_cells(resource: &SingleResource) -> [String; 4] {
    [
        resource.region.clone(),
        resource.service.clone(),
        resource.product.clone().unwrap_or_default(),
        resource.id.clone(),
    ]
}

/// Build the bordered inventory table
pub fn render_table(resources: &[SingleResource]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(HEADERS.iter().map(|h| Cell::new(*h)).collect::<Vec<_>>());

    for resource in resources {
        table.add_row(row_cells(resource).into_iter().map(Cell::new).collect::<Vec<_>>());
    }

    table
}

/// Print the table to stdout and any skipped regions to stderr
pub fn print_inventory(inventory: &Inventory) {
    println!("{}", render_table(&inventory.resources));

    if !inventory.is_complete() {
        eprintln!(
            "{} region(s) could not be collected:",
            inventory.failed_regions.len()
        );
        for failure in &inventory.failed_regions {
            eprintln!("  {}: {}", failure.region, failure.reason);
        }
    }
}
