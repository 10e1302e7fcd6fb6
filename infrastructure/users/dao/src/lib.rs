pub mod config;
mod memory;
mod redis_dao;

pub use config::{
    ConfigError, StoreBackend, StoreConfig, env_var, open_repository,
    parse_var,
};
pub use memory::InMemoryUserDao;
pub use redis_dao::UserDao;

/// Location of the user records inside the key-value store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub region: String,
    pub name: String,
}

impl Table {
    pub fn new(region: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            name: name.into(),
        }
    }

    /// Hash key holding one field per user id.
    pub fn key(&self) -> String { format!("{}:{}", self.region, self.name) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_key_is_namespaced_by_region() {
        let table = Table::new("eu-west-1", "users");

        assert_eq!(table.key(), "eu-west-1:users");
    }
}
