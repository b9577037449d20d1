use clap::Parser;
use cookiedeck::cli::{Cli, Commands, ProfileAction};
use cookiedeck::cli::commands::set::SetArgs;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List => cookiedeck::cli::commands::list::execute(&cli),
        Commands::Get { ref name, copy } => cookiedeck::cli::commands::get::execute(&cli, name, copy),
        Commands::Set {
            ref name,
            ref value,
            ref path,
            secure,
            http_only,
            ref same_site,
            subdomains,
            expires,
            ref rename,
        } => cookiedeck::cli::commands::set::execute(
            &cli,
            &SetArgs {
                name,
                value: value.as_deref(),
                path,
                secure,
                http_only,
                same_site,
                subdomains,
                expires,
                rename: rename.as_deref(),
            },
        ),
        Commands::Delete {
            ref name,
            ref path,
            all,
            force,
        } => cookiedeck::cli::commands::delete::execute(&cli, name.as_deref(), path.as_deref(), all, force),
        Commands::Import {
            ref file,
            ref format,
        } => cookiedeck::cli::commands::import_cmd::execute(&cli, file, format.as_deref()),
        Commands::Export {
            ref format,
            ref output,
            copy,
        } => cookiedeck::cli::commands::export::execute(&cli, format, output.as_deref(), copy),
        Commands::Share {
            profiles,
            encrypt,
            ttl_hours,
            copy,
        } => cookiedeck::cli::commands::share::execute(&cli, profiles, encrypt, ttl_hours, copy),
        Commands::Open { ref url, force } => cookiedeck::cli::commands::open_cmd::execute(&cli, url, force),
        Commands::Profile { ref action } => match action {
            ProfileAction::Save { ref name, force } => {
                cookiedeck::cli::commands::profile_save::execute(&cli, name, *force)
            }
            ProfileAction::Load { ref name } => {
                cookiedeck::cli::commands::profile_load::execute(&cli, name)
            }
            ProfileAction::List => cookiedeck::cli::commands::profile_list::execute(&cli),
            ProfileAction::Rename { ref from, ref to } => {
                cookiedeck::cli::commands::profile_rename::execute(&cli, from, to)
            }
            ProfileAction::Delete { ref name, force } => {
                cookiedeck::cli::commands::profile_delete::execute(&cli, name, *force)
            }
            ProfileAction::Status => cookiedeck::cli::commands::profile_status::execute(&cli),
        },
        Commands::Undo => cookiedeck::cli::commands::undo_cmd::execute(&cli),
        Commands::Redo => cookiedeck::cli::commands::redo_cmd::execute(&cli),
        Commands::History { clear } => cookiedeck::cli::commands::history_cmd::execute(&cli, clear),
        Commands::Completions { ref shell } => cookiedeck::cli::commands::completions::execute(shell),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            cookiedeck::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
    };

    if let Err(e) = result {
        cookiedeck::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
