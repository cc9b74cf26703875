use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Address of the FlashVault server, e.g. http://192.168.1.20:8000
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Settings file to use instead of the one in the config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upload files one after another
    Upload {
        /// Remote directory to upload into
        #[arg(long)]
        path: Option<String>,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Delete a file on the server
    Delete {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Name shown in the confirmation, defaults to the last path component
        #[arg(long)]
        name: Option<String>,

        /// Path of the file relative to the server's shared directory
        path: String,
    },
    /// Show how much space is left on the server
    Status,
}

impl Command {
    /// Name of a remote path as shown to the user
    pub fn display_name(path: &str) -> &str {
        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|n| !n.is_empty())
            .unwrap_or(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from([
            "flashvault-uploader",
            "--server",
            "http://nas:8000",
            "upload",
            "--path",
            "photos",
            "a.jpg",
            "b.jpg",
        ])
        .unwrap();
        assert_eq!(cli.server.as_deref(), Some("http://nas:8000"));
        assert_eq!(
            cli.command,
            Command::Upload {
                path: Some("photos".into()),
                files: vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")],
            }
        );
    }

    #[test]
    fn test_upload_needs_files() {
        assert!(Cli::try_parse_from(["flashvault-uploader", "upload"]).is_err());
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["flashvault-uploader", "delete", "-y", "docs/a.txt"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Delete {
                yes: true,
                name: None,
                path: "docs/a.txt".into(),
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["flashvault-uploader", "status", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(cli.command, Command::Status);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Command::display_name("docs/report.pdf"), "report.pdf");
        assert_eq!(Command::display_name("report.pdf"), "report.pdf");
        assert_eq!(Command::display_name("docs/sub/"), "sub");
    }
}
