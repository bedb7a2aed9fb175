//! Investigation catalog loader.

use std::path::Path;
use std::sync::Arc;

use game_core::{Catalog, CatalogSpec};

use crate::loaders::{LoadResult, read_file};

/// Loader for the investigation catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Arc<Catalog>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Arc<Catalog>> {
        let spec: CatalogSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        let catalog =
            Catalog::from_spec(spec).map_err(|e| anyhow::anyhow!("Invalid catalog: {}", e))?;

        Ok(Arc::new(catalog))
    }

    /// The basement catalog embedded in the crate.
    pub fn builtin() -> LoadResult<Arc<Catalog>> {
        Self::parse(crate::builtin::CATALOG_RON)
    }
}

#[cfg(test)]
mod tests {
    use game_core::RouteDifficulty;

    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = CatalogLoader::builtin().unwrap();

        assert_eq!(catalog.objects().count(), 4);
        assert_eq!(catalog.clues().count(), 12);
        assert_eq!(catalog.quests().count(), 3);

        let routes: Vec<_> = catalog
            .quests()
            .filter_map(|(_, quest)| quest.escape_route.as_ref())
            .map(|route| (route.name.as_str(), route.difficulty))
            .collect();
        assert_eq!(
            routes,
            [
                ("Water Pipe", RouteDifficulty::Medium),
                ("Secret Passage", RouteDifficulty::Easy)
            ]
        );
    }

    #[test]
    fn optional_clue_fields_may_be_omitted() {
        let ron = r#"(
            objects: [
                (
                    id: "crate",
                    name: "Crate",
                    clues: ["splinter"],
                    descriptions: (initial: "a", detailed: "b", expert: "c"),
                    max_investigations: 1,
                ),
            ],
            clues: [(id: "splinter", description: "A splinter.")],
            quests: [],
        )"#;

        let catalog = CatalogLoader::parse(ron).unwrap();
        let splinter = catalog.clue_id("splinter").unwrap();
        assert!(catalog.clue(splinter).unwrap().reveals_quest.is_none());
    }

    #[test]
    fn validation_errors_are_reported() {
        let ron = r#"(
            objects: [],
            clues: [],
            quests: [
                (
                    id: "q",
                    name: "Q",
                    description: "",
                    required_clues: ["missing"],
                    reward: "",
                ),
            ],
        )"#;

        let err = CatalogLoader::parse(ron).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
