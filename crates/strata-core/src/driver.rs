use std::fmt;
use std::str::FromStr;

use crate::error::StrataError;

/// Supported database back ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    MySql,
    Postgres,
    Firebird,
    SqlServer,
    Sqlite,
    Cassandra,
    MongoDb,
}

/// Accepted driver names, matched case-insensitively.
const DRIVER_NAMES: &[(&str, Driver)] = &[
    ("mysql", Driver::MySql),
    ("postgresql", Driver::Postgres),
    ("postgres", Driver::Postgres),
    ("firebirdsql", Driver::Firebird),
    ("firebird", Driver::Firebird),
    ("sqlserver", Driver::SqlServer),
    ("mssql", Driver::SqlServer),
    ("sqlite", Driver::Sqlite),
    ("sqlite3", Driver::Sqlite),
    ("cassandra", Driver::Cassandra),
    ("mongodb", Driver::MongoDb),
    ("mongo", Driver::MongoDb),
];

impl Driver {
    /// All drivers, in the order they are documented.
    pub const ALL: [Driver; 7] = [
        Driver::MySql,
        Driver::Postgres,
        Driver::Firebird,
        Driver::SqlServer,
        Driver::Sqlite,
        Driver::Cassandra,
        Driver::MongoDb,
    ];

    /// Look up a driver by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        DRIVER_NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, driver)| *driver)
    }

    /// Canonical driver name.
    pub fn name(&self) -> &'static str {
        match self {
            Driver::MySql => "mysql",
            Driver::Postgres => "postgresql",
            Driver::Firebird => "firebirdsql",
            Driver::SqlServer => "sqlserver",
            Driver::Sqlite => "sqlite",
            Driver::Cassandra => "cassandra",
            Driver::MongoDb => "mongodb",
        }
    }

    /// Port used when the configuration does not name one.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Driver::MySql => Some(3306),
            Driver::Postgres => Some(5432),
            Driver::Firebird => Some(3050),
            Driver::SqlServer => Some(1433),
            Driver::Cassandra => Some(9042),
            Driver::MongoDb => Some(27017),
            Driver::Sqlite => None,
        }
    }

    /// The kind of migration file this back end renders and runs.
    pub fn migration_kind(&self) -> MigrationKind {
        match self {
            Driver::Cassandra => MigrationKind::Cql,
            Driver::MongoDb => MigrationKind::Script,
            _ => MigrationKind::Sql,
        }
    }

    /// Whether `CREATE TABLE IF NOT EXISTS` is understood by this dialect.
    pub fn supports_if_not_exists(&self) -> bool {
        !matches!(self, Driver::Firebird)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Driver {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| StrataError::UnsupportedDriver(s.to_string()))
    }
}

/// Kind of migration file, which fixes its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationKind {
    /// Plain SQL DDL.
    Sql,
    /// Cassandra Query Language.
    Cql,
    /// MongoDB shell script.
    Script,
}

impl MigrationKind {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            MigrationKind::Sql => "sql",
            MigrationKind::Cql => "cql",
            MigrationKind::Script => "js",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_names_case_insensitive() {
        assert_eq!(Driver::from_name("MySQL"), Some(Driver::MySql));
        assert_eq!(Driver::from_name("POSTGRESQL"), Some(Driver::Postgres));
        assert_eq!(Driver::from_name("FirebirdSql"), Some(Driver::Firebird));
        assert_eq!(Driver::from_name("SqlServer"), Some(Driver::SqlServer));
        assert_eq!(Driver::from_name("SQLite"), Some(Driver::Sqlite));
        assert_eq!(Driver::from_name("Cassandra"), Some(Driver::Cassandra));
        assert_eq!(Driver::from_name("MongoDB"), Some(Driver::MongoDb));
    }

    #[test]
    fn test_every_canonical_name_round_trips() {
        for driver in Driver::ALL {
            assert_eq!(Driver::from_name(driver.name()), Some(driver));
        }
    }

    #[test]
    fn test_unknown_driver_is_error() {
        let err = "oracle".parse::<Driver>().unwrap_err();
        assert!(matches!(err, StrataError::UnsupportedDriver(ref name) if name == "oracle"));
        assert!(err.to_string().contains("oracle"));
        assert!(Driver::from_name("").is_none());
    }

    #[test]
    fn test_migration_kinds() {
        assert_eq!(Driver::MySql.migration_kind().extension(), "sql");
        assert_eq!(Driver::Cassandra.migration_kind().extension(), "cql");
        assert_eq!(Driver::MongoDb.migration_kind().extension(), "js");
    }

    #[test]
    fn test_firebird_has_no_if_not_exists() {
        assert!(!Driver::Firebird.supports_if_not_exists());
        assert!(Driver::Postgres.supports_if_not_exists());
    }
}
