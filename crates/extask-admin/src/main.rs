use clap::{Parser, Subcommand};
use extask_client::{EngineClient, RestEngineClient};
use extask_core::{Variable, VariableMap};

#[derive(Parser, Debug)]
#[command(name = "extask-admin")]
#[command(about = "Process engine admin CLI", long_about = None)]
struct Args {
    /// Engine base URL
    #[arg(short, long, default_value = "http://127.0.0.1:8080/engine-rest")]
    engine: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a process instance by process definition key
    Start {
        /// Process definition key
        process_id: String,

        /// Business key attached to the instance
        #[arg(short, long)]
        business_key: Option<String>,

        /// String variables as name=value pairs
        #[arg(short, long = "var")]
        vars: Vec<String>,
    },
}

fn parse_vars(pairs: &[String]) -> anyhow::Result<VariableMap> {
    let mut variables = VariableMap::new();

    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("expected name=value, got: {}", pair))?;
        variables.insert(name.to_string(), Variable::string(value));
    }

    Ok(variables)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Start {
            process_id,
            business_key,
            vars,
        } => {
            let variables = parse_vars(&vars)?;
            let client = RestEngineClient::new(args.engine);

            client
                .start_process(&process_id, business_key.as_deref(), &variables)
                .await?;

            println!("Process instance started: {}", process_id);
        }
    }

    Ok(())
}
