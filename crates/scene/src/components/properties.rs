/// Free-form key/value pairs attached to an entity, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentProperties {
    pub pairs: Vec<(String, String)>,
}

impl ComponentProperties {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Inserts or replaces `key`, keeping the original position on replace.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ComponentProperties;

    #[test]
    fn set_replaces_in_place() {
        let mut props = ComponentProperties::default();
        props.set("kind", "preview");
        props.set("layer", "draw");
        props.set("kind", "drawn");
        assert_eq!(props.get("kind"), Some("drawn"));
        assert_eq!(props.pairs[0].0, "kind");
        assert_eq!(props.pairs.len(), 2);
    }
}
