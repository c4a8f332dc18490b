use viewcfg_types::{PropertyVisualConfig, VisualConfig};

/// Node of the dot-path hierarchy shown in a property pane
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    pub name: String,
    pub full_path: String,
    /// Set when the path itself is a configured property, not only a prefix
    pub property: Option<PropertyVisualConfig>,
    pub children: Vec<PropertyNode>,
}

impl PropertyNode {
    fn new(name: &str, full_path: String) -> Self {
        Self {
            name: name.to_string(),
            full_path,
            property: None,
            children: Vec::new(),
        }
    }

    pub fn is_property(&self) -> bool {
        self.property.is_some()
    }

    pub fn find(&self, path: &str) -> Option<&PropertyNode> {
        if self.full_path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }
}

/// Group a config's property paths into a tree, ordered by path
pub fn build_property_tree(config: &VisualConfig) -> Vec<PropertyNode> {
    let mut properties: Vec<&PropertyVisualConfig> = config.properties.values().collect();
    properties.sort_by(|a, b| a.property_path.cmp(&b.property_path));

    let mut roots: Vec<PropertyNode> = Vec::new();
    for property in properties {
        let parts: Vec<&str> = property.property_path.split('.').collect();
        let mut level = &mut roots;

        for (i, part) in parts.iter().enumerate() {
            let pos = match level.iter().position(|n| n.name == *part) {
                Some(pos) => pos,
                None => {
                    level.push(PropertyNode::new(part, parts[..=i].join(".")));
                    level.len() - 1
                }
            };
            if i == parts.len() - 1 {
                level[pos].property = Some(property.clone());
            }
            level = &mut level[pos].children;
        }
    }
    roots
}
