use std::collections::BTreeMap;

/// OSM tags of one object. Keys are unique; a later value for the same key replaces the earlier
/// one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    pub fn empty() -> Tags {
        Tags(BTreeMap::new())
    }

    pub fn get(&self, k: &str) -> Option<&String> {
        self.0.get(k)
    }

    pub fn is(&self, k: &str, v: &str) -> bool {
        self.0.get(k).map(|x| x.as_str()) == Some(v)
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, k: K, v: V) {
        self.0.insert(k.into(), v.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Tags {
        Tags(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
