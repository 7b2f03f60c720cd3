//! Schema command - Print the JSON Schema of the config file

use crate::config::GESSO_CONFIG_SCHEMA;

pub fn run() {
    println!("{}", GESSO_CONFIG_SCHEMA);
}
