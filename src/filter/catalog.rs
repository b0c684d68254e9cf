use crate::filter::contains_ci;
use crate::models::{Category, SubCategory};

/// Prune the bibliography to the materials whose name or details contain
/// `query`. Subcategories and categories left without materials disappear.
pub fn filter_catalog(categories: &[Category], query: &str) -> Vec<Category> {
    if query.is_empty() {
        return categories.to_vec();
    }

    categories
        .iter()
        .filter_map(|category| {
            let sub_categories: Vec<SubCategory> = category
                .sub_categories
                .iter()
                .filter_map(|sub| {
                    let materials: Vec<_> = sub
                        .materials
                        .iter()
                        .filter(|m| contains_ci(&m.name, query) || contains_ci(&m.details, query))
                        .cloned()
                        .collect();
                    (!materials.is_empty()).then(|| SubCategory {
                        name: sub.name.clone(),
                        materials,
                    })
                })
                .collect();
            (!sub_categories.is_empty()).then(|| Category {
                sub_categories,
                ..category.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::catalog::{CategoryIcon, Material};

    fn tree() -> Vec<Category> {
        let material = |name: &str, details: &str| Material {
            name: name.to_string(),
            details: details.to_string(),
        };
        vec![
            Category {
                id: 1,
                name: "Teologia Sistemática".to_string(),
                icon: CategoryIcon::Book,
                description: String::new(),
                sub_categories: vec![
                    SubCategory {
                        name: "Bibliologia".to_string(),
                        materials: vec![
                            material("Inspiração", "Teologia Sistemática – Wayne Grudem"),
                            material("Cânon", "O Cânon das Escrituras – F. F. Bruce"),
                        ],
                    },
                    SubCategory {
                        name: "Cristologia".to_string(),
                        materials: vec![material("Encarnação", "A Pessoa de Cristo – Donald Macleod")],
                    },
                ],
            },
            Category {
                id: 2,
                name: "História da Igreja".to_string(),
                icon: CategoryIcon::History,
                description: String::new(),
                sub_categories: vec![SubCategory {
                    name: "Reforma".to_string(),
                    materials: vec![material("Lutero", "Here I Stand – Roland Bainton")],
                }],
            },
        ]
    }

    #[test]
    fn empty_query_returns_the_input() {
        let c = tree();
        assert_eq!(filter_catalog(&c, ""), c);
    }

    #[test]
    fn whitespace_is_searched_literally() {
        let mut c = tree();
        c[1].sub_categories[0].materials.push(Material {
            name: "Confissões".to_string(),
            details: "Agostinho".to_string(),
        });
        let spaced = filter_catalog(&c, " ");
        assert_eq!(spaced.len(), 2);
        assert_eq!(spaced[1].sub_categories[0].materials.len(), 1);
        assert_eq!(spaced[1].sub_categories[0].materials[0].name, "Lutero");

        assert!(filter_catalog(&c, "lutero ").is_empty());
        assert!(filter_catalog(&fixtures::catalog::load().unwrap(), "calvino   ").is_empty());
    }

    #[test]
    fn prunes_empty_branches() {
        let c = tree();
        let found = filter_catalog(&c, "bruce");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sub_categories.len(), 1);
        assert_eq!(found[0].sub_categories[0].materials[0].name, "Cânon");
        assert_eq!(found[0].name, "Teologia Sistemática");
    }

    #[test]
    fn matches_on_name_or_details() {
        let c = tree();
        assert_eq!(filter_catalog(&c, "LUTERO")[0].id, 2);
        assert_eq!(filter_catalog(&c, "macleod")[0].sub_categories[0].name, "Cristologia");
    }

    #[test]
    fn filtering_is_idempotent_and_leaves_the_source_alone() {
        let c = fixtures::catalog::load().unwrap();
        let before = c.clone();
        let once = filter_catalog(&c, "calvino");
        let twice = filter_catalog(&once, "calvino");
        assert_eq!(once, twice);
        assert_eq!(c, before);
    }

    #[test]
    fn no_match_gives_an_empty_tree() {
        assert!(filter_catalog(&tree(), "zzzz-inexistente").is_empty());
    }
}
