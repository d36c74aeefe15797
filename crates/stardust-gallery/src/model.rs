//! Project catalog model, mirroring the `data/projects.json` shape.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCatalog {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub category_icon: String,
    pub badge: String,
    #[serde(default)]
    pub badge_type: BadgeKind,
    pub image: String,
    pub status: ProjectStatus,
    pub links: ProjectLinks,
    #[serde(default)]
    pub stats: Vec<ProjectStat>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStatus {
    #[serde(rename = "type", default)]
    pub kind: StatusKind,
    pub indicator: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectLinks {
    pub live: String,
    pub github: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    pub color: String,
}

/// Badge variants; anything unrecognized falls back to the default class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BadgeKind {
    Hot,
    Trending,
    New,
    Pro,
    Latest,
    Innovative,
    #[default]
    #[serde(other)]
    Unknown,
}

impl BadgeKind {
    pub fn class(self) -> &'static str {
        match self {
            BadgeKind::Trending => "trending",
            BadgeKind::New => "new",
            BadgeKind::Pro => "pro",
            BadgeKind::Latest => "latest",
            BadgeKind::Innovative => "innovative",
            BadgeKind::Hot | BadgeKind::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Active,
    Deployed,
    Beta,
    Enterprise,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StatusKind {
    pub fn class(self) -> &'static str {
        match self {
            StatusKind::Active => "pulse",
            StatusKind::Deployed => "deployed",
            StatusKind::Beta => "beta",
            StatusKind::Enterprise => "enterprise",
            StatusKind::Completed => "completed",
            StatusKind::Unknown => "",
        }
    }
}

impl ProjectCatalog {
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn featured(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    /// Unique categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for project in &self.projects {
            if !seen.contains(&project.category.as_str()) {
                seen.push(project.category.as_str());
            }
        }
        seen
    }

    /// `"all"` returns every project.
    pub fn filter_by_category(&self, category: &str) -> Vec<&Project> {
        if category == "all" {
            return self.projects.iter().collect();
        }
        self.projects
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Case-insensitive search across title, description, category, and
    /// technology names.
    pub fn search(&self, query: &str) -> Vec<&Project> {
        let needle = query.to_lowercase();
        self.projects
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.technologies
                        .iter()
                        .any(|t| t.name.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "projects": [
            {
                "id": "nebula",
                "title": "Nebula Dashboard",
                "description": "Realtime analytics dashboard",
                "category": "Web App",
                "categoryIcon": "**",
                "badge": "HOT",
                "badgeType": "hot",
                "image": "assets/projects/nebula.png",
                "status": { "type": "active", "indicator": "online", "label": "Live" },
                "links": { "live": "https://example.com", "github": "https://github.com/x/nebula" },
                "stats": [ { "value": "12k", "label": "users" } ],
                "technologies": [ { "name": "Rust", "color": "orange" } ],
                "featured": true
            },
            {
                "id": "quasar",
                "title": "Quasar CLI",
                "description": "Terminal tooling",
                "category": "Tooling",
                "categoryIcon": ">_",
                "badge": "NEW",
                "badgeType": "unknown-value",
                "image": "assets/projects/quasar.png",
                "status": { "type": "parked", "indicator": "idle", "label": "Paused" },
                "links": { "live": "https://example.com/q", "github": "https://github.com/x/quasar" }
            }
        ]
    }"#;

    fn catalog() -> ProjectCatalog {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn full_shape_parses() {
        let catalog = catalog();
        assert_eq!(catalog.projects.len(), 2);
        let nebula = catalog.get("nebula").unwrap();
        assert!(nebula.featured);
        assert_eq!(nebula.badge_type, BadgeKind::Hot);
        assert_eq!(nebula.status.kind, StatusKind::Active);
        assert_eq!(nebula.stats.len(), 1);
    }

    #[test]
    fn unrecognized_badge_and_status_fall_back_to_default() {
        let catalog = catalog();
        let quasar = catalog.get("quasar").unwrap();
        assert_eq!(quasar.badge_type, BadgeKind::Unknown);
        assert_eq!(quasar.badge_type.class(), "");
        assert_eq!(quasar.status.kind, StatusKind::Unknown);
        assert_eq!(quasar.status.kind.class(), "");
    }

    #[test]
    fn missing_optional_sections_render_empty() {
        let catalog = catalog();
        let quasar = catalog.get("quasar").unwrap();
        assert!(quasar.stats.is_empty());
        assert!(quasar.technologies.is_empty());
        assert!(!quasar.featured);
    }

    #[test]
    fn badge_classes_match_the_lookup_table() {
        assert_eq!(BadgeKind::Trending.class(), "trending");
        assert_eq!(BadgeKind::Pro.class(), "pro");
        assert_eq!(BadgeKind::Hot.class(), "");
    }

    #[test]
    fn queries_filter_search_and_list_categories() {
        let catalog = catalog();
        assert_eq!(catalog.categories(), vec!["Web App", "Tooling"]);
        assert_eq!(catalog.filter_by_category("all").len(), 2);
        assert_eq!(catalog.filter_by_category("Tooling").len(), 1);
        assert_eq!(catalog.search("rust").len(), 1);
        assert_eq!(catalog.search("TERMINAL").len(), 1);
        assert!(catalog.search("cobol").is_empty());
        assert_eq!(catalog.featured().len(), 1);
    }
}
