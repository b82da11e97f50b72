use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use users_api::client::UsersClient;
use users_api::User;

#[derive(Parser)]
#[command(name = "users-cli")]
#[command(about = "Command-line client for the users service", long_about = None)]
struct Cli {
    #[arg(short, long, env = "USERS_API_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all users
    List,
    /// Show one user
    Get { id: i64 },
    /// Append a user
    Create(UserArgs),
    /// Replace every user with the given id
    Update {
        id: i64,
        #[command(flatten)]
        user: UserArgs,
    },
    /// Delete every user with the given id
    Delete { id: i64 },
}

#[derive(Args)]
struct UserArgs {
    #[arg(long)]
    id: i64,
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: u32,
}

impl From<UserArgs> for User {
    fn from(args: UserArgs) -> Self {
        User::new(args.id, args.name, args.age)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = UsersClient::new(&cli.url);

    match cli.command {
        Commands::List => print_json(&client.list().await?)?,
        Commands::Get { id } => match client.get(id).await? {
            Some(user) => print_json(&user)?,
            None => eprintln!("No user with id {}", id),
        },
        Commands::Create(args) => print_json(&client.create(&args.into()).await?)?,
        Commands::Update { id, user } => print_json(&client.replace(id, &user.into()).await?)?,
        Commands::Delete { id } => {
            client.delete(id).await?;
            println!("Deleted user {}", id);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
