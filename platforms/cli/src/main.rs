use clap::Parser;
use enigma::machine::EnigmaMachine;
use enigma::parser::{parse_rotor_list, parse_setting_list};
use enigma::types::{MachineConfig, ReflectorKind, RotorSlot, Stepping};
use enigma::SettingsLoader;
use std::io::Read;
use std::path::Path;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Machine settings file (.enigma) to load
    #[clap(short, long, conflicts_with_all = ["rotors", "positions", "rings", "reflector", "basic"])]
    settings: Option<String>,

    /// Rotor order, leftmost first (e.g. "I II III")
    #[clap(long, default_value = "I II III")]
    rotors: String,

    /// Starting positions, one per rotor (letters A-Z or numbers 0-25); default all A
    #[clap(short, long)]
    positions: Option<String>,

    /// Ring settings, one per rotor (letters A-Z or numbers 0-25); default all A
    #[clap(long)]
    rings: Option<String>,

    /// Reflector type (B or C)
    #[clap(long, default_value = "B")]
    reflector: String,

    /// Use basic stepping (rightmost rotor only, any rotor count)
    #[clap(long)]
    basic: bool,

    /// The message text; read from stdin when omitted
    text: Vec<String>,

    /// Print rotor positions after each letter
    #[clap(short = 'd', long)]
    debug: bool,
}

fn build_config(cli: &Cli) -> Result<MachineConfig, enigma::EnigmaError> {
    if let Some(path) = &cli.settings {
        return SettingsLoader::load_settings(Path::new(path));
    }

    let kinds = parse_rotor_list(&cli.rotors)?;
    let positions = match &cli.positions {
        Some(value) => parse_setting_list(value)?,
        None => vec![0; kinds.len()],
    };
    let rings = match &cli.rings {
        Some(value) => parse_setting_list(value)?,
        None => vec![0; kinds.len()],
    };

    for (flag, list) in [("--positions", &positions), ("--rings", &rings)] {
        if list.len() != kinds.len() {
            return Err(enigma::EnigmaError::ValidationError(format!(
                "{} has {} entries for {} rotors",
                flag,
                list.len(),
                kinds.len()
            )));
        }
    }

    let config = MachineConfig {
        name: String::new(),
        rotors: kinds
            .into_iter()
            .zip(positions)
            .zip(rings)
            .map(|((kind, position), ring)| RotorSlot::new(kind, position, ring))
            .collect(),
        reflector: cli.reflector.parse::<ReflectorKind>()?,
        stepping: if cli.basic {
            Stepping::Basic
        } else {
            Stepping::Classic
        },
    };

    config.validate()?;
    Ok(config)
}

fn read_input(cli: &Cli) -> String {
    if !cli.text.is_empty() {
        return cli.text.join(" ");
    }

    if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .expect("failed to read stdin");
        return buffer.trim_end_matches('\n').to_string();
    }

    String::new()
}

fn main() {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let input = read_input(&cli);
    let mut machine = match EnigmaMachine::new(config) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if cli.debug {
        let mut output = String::new();
        println!("Positions: {}", machine.position_letters());
        for c in input.chars() {
            let encoded = machine.encode_char(c);
            output.push(encoded);
            if c.is_ascii_alphabetic() {
                println!(
                    "{} -> {}  positions: {}",
                    c.to_ascii_uppercase(),
                    encoded,
                    machine.position_letters()
                );
            }
        }
        println!("\n{}", output);
    } else {
        println!("{}", machine.encode_str(&input));
    }
}
