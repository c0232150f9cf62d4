use super::*;

pub(super) fn catalogue_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("listings.json")
}

/// Listings served by the dev server: `<data-dir>/listings.json` when present, else the
/// built-in sample set.
pub(super) fn load_catalogue(data_dir: &std::path::Path) -> Result<Vec<Listing>> {
    let path = catalogue_path(data_dir);
    if !path.exists() {
        return Ok(sample_catalogue());
    }
    let bytes = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    let listings: Vec<Listing> =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;

    let mut seen = HashSet::new();
    for l in &listings {
        if !seen.insert(l.id.as_str()) {
            anyhow::bail!("duplicate listing id {} in {}", l.id, path.display());
        }
    }
    Ok(listings)
}

fn sample(
    id: &str,
    title: &str,
    description: &str,
    price: f64,
    category: &str,
    condition: &str,
    created_at: &str,
) -> Listing {
    Listing {
        id: ListingId::from(id),
        title: title.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        condition: condition.to_string(),
        images: vec![format!("https://images.example.invalid/{}.jpg", id)],
        location: Some("Berlin".to_string()),
        created_at: Some(created_at.to_string()),
    }
}

pub(super) fn sample_catalogue() -> Vec<Listing> {
    vec![
        sample(
            "65f1a0c2e4b0a1b2c3d4e001",
            "Oak writing desk",
            "Solid oak, two drawers, light scratches on the top.",
            120.0,
            "furniture",
            "used",
            "2024-01-10T09:00:00Z",
        ),
        sample(
            "65f1a0c2e4b0a1b2c3d4e002",
            "Brass desk lamp",
            "Adjustable arm, E27 socket.",
            25.0,
            "lighting",
            "like-new",
            "2024-03-02T14:15:00Z",
        ),
        sample(
            "65f1a0c2e4b0a1b2c3d4e003",
            "City bike 28\"",
            "Seven gears, new tyres, includes lock.",
            180.0,
            "sports",
            "used",
            "2024-02-18T08:40:00Z",
        ),
        sample(
            "65f1a0c2e4b0a1b2c3d4e004",
            "Winter parka (M)",
            "Down filled, worn one season.",
            65.0,
            "clothing",
            "like-new",
            "2024-02-25T19:05:00Z",
        ),
        sample(
            "65f1a0c2e4b0a1b2c3d4e005",
            "Mechanical keyboard",
            "Brown switches, ISO layout.",
            45.0,
            "electronics",
            "used",
            "2024-03-05T11:30:00Z",
        ),
        sample(
            "65f1a0c2e4b0a1b2c3d4e006",
            "Cast iron skillet",
            "26 cm, seasoned.",
            20.0,
            "kitchen",
            "used",
            "2023-12-01T07:20:00Z",
        ),
        sample(
            "65f1a0c2e4b0a1b2c3d4e007",
            "Bookshelf, white",
            "Five shelves, 180 cm tall. Pick-up only.",
            40.0,
            "furniture",
            "used",
            "2024-01-28T16:00:00Z",
        ),
        sample(
            "65f1a0c2e4b0a1b2c3d4e008",
            "Noise cancelling headphones",
            "Sealed box, unwanted gift.",
            150.0,
            "electronics",
            "new",
            "2024-03-07T10:10:00Z",
        ),
    ]
}
