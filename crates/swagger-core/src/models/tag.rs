use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// OpenAPI tag grouping the paths of one logical resource.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }
}

/// Ordered tag list, deduplicated by name on insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagList(Vec<Tag>);

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `tag` unless a tag with the same name is already present.
    ///
    /// Returns whether the tag was inserted.
    pub fn push_unique(&mut self, tag: Tag) -> bool {
        if self.0.iter().any(|t| t.name == tag.name) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Tag> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tag_with_a_name_wins() {
        let mut tags = TagList::new();
        assert!(tags.push_unique(Tag::new("blog", Some("first".to_string()))));
        assert!(!tags.push_unique(Tag::new("blog", Some("second".to_string()))));
        assert!(tags.push_unique(Tag::new("user", None)));

        let tags = tags.into_inner();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].description.as_deref(), Some("first"));
        assert_eq!(tags[1].name, "user");
    }

    #[test]
    fn omits_missing_description() {
        let value = serde_json::to_value(Tag::new("user", None)).unwrap();
        assert_eq!(value, serde_json::json!({ "name": "user" }));
    }
}
