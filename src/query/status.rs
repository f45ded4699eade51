use crate::MsqErr;
use serde::Serialize;

/// Placeholder for text fields that have not been queried yet.
pub const UNKNOWN: &str = "<unknown>";

/// Server status decoded from a [full stat](https://wiki.vg/Query#Full_stat) reply.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub(crate) motd: String,
    pub(crate) game_type: String,
    pub(crate) game_id: String,
    pub(crate) version: String,
    pub(crate) plugins: String,
    pub(crate) map: String,
    pub(crate) online_players: i32,
    pub(crate) max_players: i32,
    pub(crate) host_port: i32,
    pub(crate) host_ip: String,
    pub(crate) players: String,
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self {
            motd: UNKNOWN.into(),
            game_type: UNKNOWN.into(),
            game_id: UNKNOWN.into(),
            version: UNKNOWN.into(),
            plugins: UNKNOWN.into(),
            map: UNKNOWN.into(),
            online_players: -1,
            max_players: -1,
            host_port: -1,
            host_ip: UNKNOWN.into(),
            players: UNKNOWN.into(),
        }
    }
}

impl std::fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

impl StatusRecord {
    /// Message of the day (`hostname` key).
    pub fn motd(&self) -> &str {
        &self.motd
    }

    pub fn game_type(&self) -> &str {
        &self.game_type
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Raw plugin text as sent by the server. See [StatusRecord::plugin_list].
    pub fn plugins(&self) -> &str {
        &self.plugins
    }

    pub fn map(&self) -> &str {
        &self.map
    }

    pub fn online_players(&self) -> i32 {
        self.online_players
    }

    pub fn max_players(&self) -> i32 {
        self.max_players
    }

    pub fn host_port(&self) -> i32 {
        self.host_port
    }

    pub fn host_ip(&self) -> &str {
        &self.host_ip
    }

    /// Player names joined with `,`, in the order the server listed them.
    pub fn players(&self) -> &str {
        &self.players
    }

    /// Iterate over the connected player names.
    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        let players = match self.players.as_str() {
            UNKNOWN => "",
            players => players,
        };

        players.split(',').filter(|name| !name.is_empty())
    }

    /// Parse the plugin text.
    ///
    /// Plugin format: `[SERVER_MOD_NAME[: PLUGIN_NAME(; PLUGIN_NAME...)]]`.
    /// Vanilla servers send an empty string.
    pub fn plugin_list(&self) -> Result<Vec<ModPlugin>, MsqErr> {
        let plugin_str = match self.plugins.trim() {
            UNKNOWN | "" => return Ok(vec![]),
            plugin_str => plugin_str,
        };

        let plugin_collection = plugin_str.split(':').map(|x| x.trim()).collect::<Vec<_>>();

        match plugin_collection.len() {
            2 => Ok(vec![ModPlugin {
                mod_name: plugin_collection[0].into(),
                plugins: plugin_collection[1]
                    .split(';')
                    .map(|x| x.trim())
                    .filter(|x| !x.is_empty())
                    .map(|x| x.into())
                    .collect::<Vec<_>>(),
            }]),
            1 => Ok(vec![ModPlugin {
                mod_name: plugin_collection[0].into(),
                plugins: vec![],
            }]),
            _ => Err(MsqErr::DataErr(format!(
                "Multiple mod plugin sections detected: {}",
                plugin_str
            ))),
        }
    }
}

/// A server mod and the plugins it reported.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ModPlugin {
    pub mod_name: String,
    pub plugins: Vec<String>,
}

impl std::fmt::Display for ModPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_plugins(plugins: &str) -> StatusRecord {
        StatusRecord {
            plugins: plugins.into(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_are_sentinels() {
        let status = StatusRecord::default();

        assert_eq!(status.motd(), "<unknown>");
        assert_eq!(status.host_ip(), "<unknown>");
        assert_eq!(status.players(), "<unknown>");
        assert_eq!(status.online_players(), -1);
        assert_eq!(status.max_players(), -1);
        assert_eq!(status.host_port(), -1);
        assert_eq!(status.player_names().count(), 0);
    }

    #[test]
    fn player_names_split_in_order() {
        let status = StatusRecord {
            players: "Alice,Bob,Carl".into(),
            ..Default::default()
        };

        assert_eq!(
            status.player_names().collect::<Vec<_>>(),
            vec!["Alice", "Bob", "Carl"]
        );
    }

    #[test]
    fn plugin_list_with_plugins() {
        let plugins =
            with_plugins("CraftBukkit on Bukkit 1.2.5-R4.0: WorldEdit 5.3; CommandBook 2.1")
                .plugin_list()
                .unwrap();

        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].mod_name, "CraftBukkit on Bukkit 1.2.5-R4.0");
        assert_eq!(plugins[0].plugins, vec!["WorldEdit 5.3", "CommandBook 2.1"]);
    }

    #[test]
    fn plugin_list_mod_only_and_empty() {
        let plugins = with_plugins("Paper on 1.20.4").plugin_list().unwrap();
        assert_eq!(plugins[0].mod_name, "Paper on 1.20.4");
        assert!(plugins[0].plugins.is_empty());

        assert!(with_plugins("").plugin_list().unwrap().is_empty());
        assert!(StatusRecord::default().plugin_list().unwrap().is_empty());
    }

    #[test]
    fn plugin_list_rejects_multiple_sections() {
        assert!(with_plugins("A: b: c").plugin_list().is_err());
    }

    #[test]
    fn display_is_json() {
        let text = StatusRecord::default().to_string();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["motd"], "<unknown>");
        assert_eq!(value["max_players"], -1);
    }
}
