use serde_yaml_ng::Value as YamlValue;

/// A structured-data value from a document, podspec or data row.
///
/// Objects keep their keys in document order so that traversal (and therefore
/// extraction order) follows the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Object(Vec<(String, Node)>),
    Array(Vec<Node>),
    String(String),
    /// Numbers and booleans, rendered as text.
    Scalar(String),
    Null,
}

/// Key of a visited node inside its parent container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKey<'a> {
    Field(&'a str),
    Index(usize),
}

impl<'a> NodeKey<'a> {
    pub fn as_field(&self) -> Option<&'a str> {
        match self {
            NodeKey::Field(key) => Some(key),
            NodeKey::Index(_) => None,
        }
    }
}

/// One step of a tree walk: a value together with where it sits.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub key: NodeKey<'a>,
    pub value: &'a Node,
    pub parent: &'a Node,
}

impl Node {
    pub fn empty_object() -> Self {
        Node::Object(Vec::new())
    }

    /// Look up a field of an object node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Follow a `.`-separated path of object fields.
    pub fn get_path(&self, path: &str) -> Option<&Node> {
        path.split('.').try_fold(self, |node, part| node.get(part))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Scalar(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// String items of an array node; other items are ignored.
    pub fn string_list(&self) -> Vec<String> {
        match self {
            Node::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn from_yaml(value: &YamlValue) -> Self {
        match value {
            YamlValue::Null => Node::Null,
            YamlValue::Bool(b) => Node::Scalar(b.to_string()),
            YamlValue::Number(n) => Node::Scalar(n.to_string()),
            YamlValue::String(s) => Node::String(s.clone()),
            YamlValue::Sequence(items) => Node::Array(items.iter().map(Node::from_yaml).collect()),
            YamlValue::Mapping(map) => Node::Object(
                map.iter()
                    .filter_map(|(k, v)| yaml_key(k).map(|key| (key, Node::from_yaml(v))))
                    .collect(),
            ),
            YamlValue::Tagged(tagged) => Node::from_yaml(&tagged.value),
        }
    }
}

fn yaml_key(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Visit every node below `root`, depth first and in document order.
///
/// The root itself is not visited since it has no parent. Containers are
/// visited before their children.
pub fn walk<'a, F>(root: &'a Node, visitor: &mut F)
where
    F: FnMut(Visit<'a>),
{
    match root {
        Node::Object(fields) => {
            for (key, value) in fields {
                visitor(Visit {
                    key: NodeKey::Field(key),
                    value,
                    parent: root,
                });
                walk(value, visitor);
            }
        }
        Node::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                visitor(Visit {
                    key: NodeKey::Index(index),
                    value,
                    parent: root,
                });
                walk(value, visitor);
            }
        }
        _ => {}
    }
}
