use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

static DEFAULT_NODE_NAME: &str = "Peer0";
static DEFAULT_ANNOUNCE_PATH: &str = "the_longest_chain.bin";
const DEFAULT_DIFFICULTY: u32 = 2;

const NODE_NAME_KEY: &str = "NODE_NAME";
const DIFFICULTY_KEY: &str = "DIFFICULTY";
const DIFFICULTY_BOMB_KEY: &str = "DIFFICULTY_BOMB";
const ANNOUNCE_PATH_KEY: &str = "ANNOUNCE_PATH";

pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        let mut map = HashMap::new();

        let mut node_name = String::from(DEFAULT_NODE_NAME);
        if let Ok(name) = env::var(NODE_NAME_KEY) {
            node_name = name;
        }
        map.insert(String::from(NODE_NAME_KEY), node_name);

        if let Ok(difficulty) = env::var(DIFFICULTY_KEY) {
            map.insert(String::from(DIFFICULTY_KEY), difficulty);
        }

        if let Ok(bomb) = env::var(DIFFICULTY_BOMB_KEY) {
            map.insert(String::from(DIFFICULTY_BOMB_KEY), bomb);
        }

        let mut announce_path = String::from(DEFAULT_ANNOUNCE_PATH);
        if let Ok(path) = env::var(ANNOUNCE_PATH_KEY) {
            announce_path = path;
        }
        map.insert(String::from(ANNOUNCE_PATH_KEY), announce_path);

        Config {
            inner: RwLock::new(map),
        }
    }

    pub fn get_node_name(&self) -> String {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner
            .get(NODE_NAME_KEY)
            .expect("Node name should always be present in config")
            .clone()
    }

    pub fn set_node_name(&self, name: String) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(NODE_NAME_KEY), name);
    }

    /// Difficulty in leading zero hex characters. Unparseable values fall
    /// back to the default.
    pub fn get_difficulty(&self) -> u32 {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner
            .get(DIFFICULTY_KEY)
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(DEFAULT_DIFFICULTY)
    }

    pub fn set_difficulty(&self, difficulty: u32) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(DIFFICULTY_KEY), difficulty.to_string());
    }

    pub fn has_difficulty_bomb(&self) -> bool {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        match inner.get(DIFFICULTY_BOMB_KEY) {
            Some(value) => value == "1" || value.eq_ignore_ascii_case("true"),
            None => false,
        }
    }

    pub fn set_difficulty_bomb(&self, enabled: bool) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(
            String::from(DIFFICULTY_BOMB_KEY),
            String::from(if enabled { "1" } else { "0" }),
        );
    }

    pub fn get_announce_path(&self) -> String {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner
            .get(ANNOUNCE_PATH_KEY)
            .expect("Announce path should always be present in config")
            .clone()
    }

    pub fn set_announce_path(&self, path: String) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(ANNOUNCE_PATH_KEY), path);
    }
}
