//! Console-variable (cvar) extraction from the log header.

use std::collections::HashMap;

/// Marker preceding every cvar declaration, wherever it sits on the line.
const CVAR_MARKER: &str = "cvar: (";

/// Console variables declared in the log, name → raw value.
///
/// Values stay untyped text; callers coerce where a typed reading is needed
/// (e.g. the timezone offset). Built once per log and never mutated
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CvarMap(HashMap<String, String>);

impl CvarMap {
    /// Collect every cvar declaration in the log.
    ///
    /// The log format does not guarantee unique names: a name declared more
    /// than once keeps its last value. A log with no declarations yields an
    /// empty map rather than an error; lookups of required names fail at the
    /// call site instead.
    #[must_use]
    pub fn from_log(log: &str) -> Self {
        let mut vars = HashMap::new();
        for line in log.lines() {
            let Some(index) = line.find(CVAR_MARKER) else {
                continue;
            };
            let declaration = line[index + CVAR_MARKER.len()..]
                .trim_end()
                .trim_end_matches(')');
            let Some((name, value)) = declaration.split_once(',') else {
                continue;
            };
            vars.insert(name.to_owned(), value.to_owned());
        }
        Self(vars)
    }

    /// Raw value for `name`, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_name_and_value_between_delimiters() {
        let cvars = CvarMap::from_log("<00:00> Lua cvar: (g_timezone,-5)\n");
        assert_eq!(cvars.get("g_timezone"), Some("-5"));
        assert_eq!(cvars.len(), 1);
    }

    #[test]
    fn collects_every_declared_name() {
        let log = "<00:00> Lua cvar: (sv_servername,norealm)\n\
                   <00:00> Lua cvar: (sv_maxplayers,16)\n\
                   <00:01> Lua cvar: (g_timezone,3)\n";
        let cvars = CvarMap::from_log(log);
        assert_eq!(cvars.len(), 3);
        assert_eq!(cvars.get("sv_servername"), Some("norealm"));
        assert_eq!(cvars.get("sv_maxplayers"), Some("16"));
        assert_eq!(cvars.get("g_timezone"), Some("3"));
    }

    #[test]
    fn last_declaration_wins_on_repeats() {
        let log = "<00:00> Lua cvar: (g_timezone,0)\n\
                   <10:00> Lua cvar: (g_timezone,-5)\n";
        assert_eq!(CvarMap::from_log(log).get("g_timezone"), Some("-5"));
    }

    #[test]
    fn value_keeps_embedded_commas() {
        let cvars = CvarMap::from_log("<00:00> Lua cvar: (sv_motd,hello, world)\n");
        assert_eq!(cvars.get("sv_motd"), Some("hello, world"));
    }

    #[test]
    fn no_declarations_yield_an_empty_map() {
        let cvars = CvarMap::from_log("Log Started at Monday, June 12, 2006 14:00:00\n");
        assert!(cvars.is_empty());
        assert_eq!(cvars.get("g_timezone"), None);
    }

    #[test]
    fn unrelated_lines_are_ignored() {
        let log = "<05:10> <Lua> papazark killed lamonthe with AG36\n\
                   <00:00> Lua cvar: (g_timezone,1)\n";
        assert_eq!(CvarMap::from_log(log).len(), 1);
    }
}
