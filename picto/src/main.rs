use std::fs;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use picto::CompileError;
use picto::ir::sexpr::IntoSExpression;
use picto::parser::lexer::{self, KEYWORDS, OPERATORS, SPECIAL_SYMBOLS};
use picto::parser::parser::parse_tokens;

#[derive(Parser)]
#[command(name = "picto")]
#[command(about = "Front end for the draw/write/grid image DSL", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Разбить исходник на токены
    Tokens {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Распарсить и показать ast
    Parse {
        #[command(flatten)]
        source: SourceArgs,

        /// Показать токены перед ast
        #[arg(long)]
        show_tokens: bool,

        /// Печатать ast как s-выражение
        #[arg(long)]
        sexpr: bool,
    },

    /// Ключевые слова, операторы и спецсимволы языка
    Keywords,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Исходник
    file: Option<String>,

    /// Код прямо из командной строки
    #[arg(short, long)]
    input: Option<String>,
}

impl SourceArgs {
    fn read(&self) -> Result<String, CompileError> {
        match (&self.input, &self.file) {
            (Some(code), _) => Ok(code.clone()),
            (None, Some(path)) => Ok(fs::read_to_string(path)?),
            (None, None) => Err(CompileError::MissingSource),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode, CompileError> {
    match command {
        Commands::Tokens { source } => {
            let source = source.read()?;
            let lexed = lexer::tokenize(&source);

            report_diagnostics(&lexed);
            for token in &lexed.tokens {
                println!("{}", token);
            }
        }
        Commands::Parse {
            source,
            show_tokens,
            sexpr,
        } => {
            let source = source.read()?;
            let lexed = lexer::tokenize(&source);
            report_diagnostics(&lexed);

            if show_tokens {
                println!("=== TOKENS ===");
                for token in &lexed.tokens {
                    println!("{}", token);
                }
                println!("=== AST ===");
            }

            match parse_tokens(&lexed.tokens) {
                Ok(program) if sexpr => println!("{}", program.to_s_expr()),
                Ok(program) => println!("{:#?}", program),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Keywords => {
            println!("Keywords:        {}", KEYWORDS.join(", "));
            println!("Operators:       {}", join_chars(&OPERATORS));
            println!("Special symbols: {}", join_chars(&SPECIAL_SYMBOLS));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn report_diagnostics(lexed: &lexer::Lexed) {
    for diagnostic in &lexed.diagnostics {
        eprintln!("Error: {}", diagnostic);
    }
}

fn join_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
