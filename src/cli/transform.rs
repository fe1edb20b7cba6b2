use clap::Args;

use crate::cli::OutputFormat;
use crate::core::transform::{complement, reverse, reverse_complement};

/// Which transformation to apply
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum Operation {
    Reverse,
    Complement,
    /// Complement in reverse order; brackets are not swapped
    #[default]
    ReverseComplement,
}

impl Operation {
    fn apply(self, sequence: &str) -> String {
        match self {
            Self::Reverse => reverse(sequence),
            Self::Complement => complement(sequence),
            Self::ReverseComplement => reverse_complement(sequence),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Reverse => "reverse",
            Self::Complement => "complement",
            Self::ReverseComplement => "reverse-complement",
        }
    }
}

#[derive(Args)]
pub struct TransformArgs {
    /// Sequence to transform
    #[arg(required = true)]
    pub sequence: String,

    /// Transformation to apply
    #[arg(short, long, value_enum, default_value = "reverse-complement")]
    pub operation: Operation,
}

pub fn run(args: TransformArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let output = args.operation.apply(&args.sequence);

    match format {
        OutputFormat::Text => println!("{output}"),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "input": args.sequence,
                "operation": args.operation.name(),
                "output": output,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("input\toperation\toutput");
            println!("{}\t{}\t{output}", args.sequence, args.operation.name());
        }
    }

    Ok(())
}
