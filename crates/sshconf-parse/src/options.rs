//! Ordered, case-insensitive option storage.

/// One option line: its name as first written and its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct ConfigOption {
    /// Option name, with the casing of its first occurrence.
    pub name: String,
    /// Arguments, possibly empty.
    pub args: Vec<String>,
}

/// Options of a single scope, in insertion order.
///
/// Names compare ASCII case-insensitively: setting `user` after `User`
/// replaces the arguments of the existing entry, keeping its position and
/// original casing. Lookups are linear; a scope rarely holds more than a
/// few dozen options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "facet", derive(facet::Facet))]
pub struct OptionMap {
    entries: Vec<ConfigOption>,
}

impl OptionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the arguments of an option, overwriting any entry whose name
    /// matches ignoring ASCII case.
    pub fn set(&mut self, name: impl Into<String>, args: Vec<String>) {
        let name = name.into();
        match self.find_mut(&name) {
            Some(option) => option.args = args,
            None => self.entries.push(ConfigOption { name, args }),
        }
    }

    /// Get the arguments of an option by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.find(name).map(|option| option.args.as_slice())
    }

    /// Whether an option is present.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Number of distinct options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over options in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigOption> {
        self.entries.iter()
    }

    /// Option names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|option| option.name.as_str())
    }

    fn find(&self, name: &str) -> Option<&ConfigOption> {
        self.entries
            .iter()
            .find(|option| option.name.eq_ignore_ascii_case(name))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut ConfigOption> {
        self.entries
            .iter_mut()
            .find(|option| option.name.eq_ignore_ascii_case(name))
    }
}

impl<'a> IntoIterator for &'a OptionMap {
    type Item = &'a ConfigOption;
    type IntoIter = std::slice::Iter<'a, ConfigOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut map = OptionMap::new();
        for (name, args) in iter {
            map.set(name, args);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_set_and_get_ignore_case() {
        let mut map = OptionMap::new();
        map.set("IdentityFile", args(&["~/.ssh/id_ed25519"]));

        assert_eq!(map.get("identityfile"), Some(&args(&["~/.ssh/id_ed25519"])[..]));
        assert_eq!(map.get("IDENTITYFILE"), map.get("IdentityFile"));
        assert!(map.contains("identityFile"));
        assert!(!map.contains("Identity"));
    }

    #[test]
    fn test_overwrite_keeps_position_and_casing() {
        let mut map = OptionMap::new();
        map.set("User", args(&["alice"]));
        map.set("Port", args(&["22"]));
        map.set("user", args(&["bob"]));

        assert_eq!(map.len(), 2);
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["User", "Port"]);
        assert_eq!(map.get("USER"), Some(&args(&["bob"])[..]));
    }

    #[test]
    fn test_empty_args() {
        let mut map = OptionMap::new();
        map.set("ForwardAgent", Vec::new());
        assert_eq!(map.get("forwardagent"), Some(&[][..]));
        assert!(!map.is_empty());
    }

    #[test]
    fn test_from_iter_uses_set_semantics() {
        let map: OptionMap = [
            ("Port", args(&["22"])),
            ("port", args(&["2222"])),
            ("User", args(&["git"])),
        ]
        .into_iter()
        .collect();

        let collected: Vec<_> = map
            .iter()
            .map(|o| (o.name.as_str(), o.args.clone()))
            .collect();
        assert_eq!(
            collected,
            vec![("Port", args(&["2222"])), ("User", args(&["git"]))]
        );
    }

    #[test]
    fn test_non_ascii_names_compare_exactly() {
        let mut map = OptionMap::new();
        map.set("Ärger", args(&["1"]));
        map.set("ärger", args(&["2"]));
        assert_eq!(map.len(), 2);
    }
}
