use crate::{
    cli::{Cli, Commands, JsonInput},
    constants::exit_codes,
    error::{Error, Result},
    ioutils::read_json_input,
    module::ModuleRequest,
    tools::{CodeGenerator, GenerateCodeRequest},
};
use serde::Serialize;
use serde_json::Value;

/// Runs one subcommand, printing its result as JSON.
///
/// Returns the process exit code: failure when a generation did not fully
/// succeed, so scripts can react without parsing the output.
pub fn run(cli: Cli) -> Result<i32> {
    let generator = match cli.root {
        Some(root) => CodeGenerator::with_root(root),
        None => CodeGenerator::discover(),
    };

    match cli.command {
        Commands::Groups => print_json(&generator.list_groups()),
        Commands::Templates { group } => print_json(&generator.list_templates(&group)?),
        Commands::Config { group, template } => {
            print_json(&generator.get_template_config(&group, template.as_deref())?)
        }
        Commands::Parse { group, data } => {
            print_json(&generator.parse_rules(&group, read_input(&data)?)?)
        }
        Commands::Generate { group, template, output, data } => {
            let data = match read_input(&data)? {
                Value::Object(data) => data,
                _ => return Err(Error::InvalidInput("data must be a JSON object".into())),
            };
            let request = GenerateCodeRequest { group, template, data, output_path: output };
            let result = generator.generate_code(&request);
            print_json(&result)?;
            Ok(exit_code(result.success))
        }
        Commands::Module { request } => {
            let request: ModuleRequest = serde_json::from_value(read_input(&request)?)?;
            let result = generator.generate_module(&request);
            print_json(&result)?;
            Ok(exit_code(result.success))
        }
        #[cfg(feature = "mcp")]
        Commands::Mcp => {
            run_mcp(generator)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn read_input(input: &JsonInput) -> Result<Value> {
    read_json_input(input.json.as_deref(), input.file.as_deref())
}

fn print_json<T: Serialize>(value: &T) -> Result<i32> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(exit_codes::SUCCESS)
}

fn exit_code(success: bool) -> i32 {
    if success {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    }
}

#[cfg(feature = "mcp")]
fn run_mcp(generator: CodeGenerator) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        Error::Other(anyhow::anyhow!("Failed to create tokio runtime: {e}"))
    })?;

    rt.block_on(async {
        crate::mcp::run_mcp_server(generator)
            .await
            .map_err(|e| Error::Other(anyhow::anyhow!("MCP server error: {e}")))
    })
}
