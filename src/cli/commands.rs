// CLI command definitions

use super::generate::GenerateCommand;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kube-recipe",
    version,
    about = "Render Kubernetes recipes from templates and environment values",
    long_about = "Renders a Deployment recipe, and a Service recipe when ports are exposed, from base templates and the values found in the environment"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate deployment.yml and, if exposed, the matching service recipe
    Generate(GenerateCommand),
}
