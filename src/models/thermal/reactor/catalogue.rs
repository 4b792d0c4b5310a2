use std::fmt::Write;

/// One standard reactor installation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogueEntry {
    /// Manufacturer.
    pub brand: &'static str,

    /// Model name.
    pub model: &'static str,

    /// Thermal power in watts.
    pub thermal_power_w: f64,

    /// Hot-side temperature in kelvin.
    pub hot_side_k: f64,
}

const fn entry(
    brand: &'static str,
    model: &'static str,
    thermal_power_w: f64,
    hot_side_k: f64,
) -> CatalogueEntry {
    CatalogueEntry {
        brand,
        model,
        thermal_power_w,
        hot_side_k,
    }
}

static CATALOGUE: [CatalogueEntry; 6] = [
    entry("fission_frontiers", "tarasque", 1e9, 1300.0),
    entry("fission_frontiers", "guivre", 2e9, 1100.0),
    entry("fission_frontiers", "peluda", 1e9, 600.0),
    entry("fission_frontiers", "lindworm", 500e6, 950.0),
    entry("fission_frontiers", "wyvern", 250e6, 600.0),
    entry("fusion_founders", "standard_reactor", 300e6, 1300.0),
];

/// Every standard reactor installation, grouped by brand.
#[must_use]
pub fn standard_reactors() -> &'static [CatalogueEntry] {
    &CATALOGUE
}

/// Finds a catalogue entry, ignoring ASCII case in both keys.
pub(super) fn lookup(brand: &str, model: &str) -> Option<&'static CatalogueEntry> {
    CATALOGUE
        .iter()
        .find(|e| e.brand.eq_ignore_ascii_case(brand) && e.model.eq_ignore_ascii_case(model))
}

/// Renders the catalogue as an indented brand/model listing.
pub(super) fn listing() -> String {
    let mut out = String::new();
    let mut current_brand = None;

    for e in &CATALOGUE {
        if current_brand != Some(e.brand) {
            let _ = writeln!(out, "\t{}:", e.brand);
            current_brand = Some(e.brand);
        }
        let _ = writeln!(out, "\t\t{}", e.model);
    }

    out.truncate(out.trim_end().len());
    out
}
