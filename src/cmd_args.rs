use std::ffi::OsString;

pub use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "forecourt", version, about, long_about = None)]
struct ClapArgs {
    /// Override the API base URL from the environment.
    #[clap(short = 'u', long, help = "API base URL override")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Admin console operations.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List car listings, with optional search and category filter.
    Cars {
        #[clap(short, long, default_value = "")]
        search: String,
        #[clap(short, long)]
        category: Option<String>,
        #[clap(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one car by id.
    Car { id: String },
    /// List categories.
    Categories,
    /// Delete a car listing by id.
    DeleteCar { id: String },
    /// Create a category, optionally with a thumbnail image file.
    CreateCategory {
        name: String,
        #[clap(short, long)]
        thumbnail: Option<std::path::PathBuf>,
    },
    /// Delete a category by name (asks for --yes to confirm).
    DeleteCategory {
        name: String,
        #[clap(long)]
        yes: bool,
    },
    /// Review submitted sell orders.
    SellOrders {
        #[clap(short, long, default_value = "")]
        search: String,
    },
    /// Review submitted custom orders.
    CustomOrders {
        #[clap(short, long, default_value = "")]
        search: String,
    },
    /// Log in and keep the session for the rest of the invocation.
    Login {
        email: String,
        #[clap(long)]
        remember: bool,
    },
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    base_url: Option<String>,
    command: Command,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        let args = ClapArgs::parse();
        Self {
            base_url: args.base_url,
            command: args.command,
        }
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = ClapArgs::parse_from(itr);
        Self {
            base_url: args.base_url,
            command: args.command,
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_cars_with_defaults() {
        let args = CommandLineArgs::parse_from(["forecourt", "cars"]);
        assert_eq!(
            args.command(),
            &Command::Cars {
                search: String::new(),
                category: None,
                page: 1,
            }
        );
        assert!(args.base_url().is_none());
    }

    #[test]
    fn test_parse_base_url_override() {
        let args = CommandLineArgs::parse_from([
            "forecourt",
            "-u",
            "https://staging.example.com",
            "categories",
        ]);
        assert_eq!(args.base_url(), Some("https://staging.example.com"));
    }

    #[test]
    fn test_parse_delete_category_confirmation_flag() {
        let args =
            CommandLineArgs::parse_from(["forecourt", "delete-category", "SUV", "--yes"]);
        assert_eq!(
            args.command(),
            &Command::DeleteCategory {
                name: "SUV".into(),
                yes: true,
            }
        );
    }

    #[test]
    fn test_parse_cars_with_search_and_page() {
        let args = CommandLineArgs::parse_from([
            "forecourt", "cars", "--search", "corolla", "--page", "2",
        ]);
        assert_eq!(
            args.command(),
            &Command::Cars {
                search: "corolla".into(),
                category: None,
                page: 2,
            }
        );
    }
}
