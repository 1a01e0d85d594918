use serde::{Deserialize, Serialize};

/// Topic identifier. This is the upstream category name, so a topic maps
/// directly onto `Category:<id>`.
pub type TopicId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub icon: String,
}

impl Topic {
    pub fn new(id: &str, name: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
        }
    }

    pub fn category_title(&self) -> String {
        category_title(&self.id)
    }
}

pub fn category_title(topic: &str) -> String {
    format!("Category:{}", topic)
}
