use clap::Parser;
use env_logger::Env;
use fe_pourbaix::view::{DiagramView, TerminalView};
use fe_pourbaix::{
    ChemistryParameters, DiagramConfig, DiagramOptions, GridSpec, PhaseFamily, PourbaixDiagram,
    RenderMode, Result, ThermodynamicConstants, stability_potential,
};
use log::info;
use std::process;

#[derive(Debug, Clone, Copy)]
struct Probe {
    ph: f64,
    e: f64,
}

fn parse_probe(s: &str) -> std::result::Result<Probe, String> {
    let (ph, e) = s
        .split_once(',')
        .ok_or_else(|| format!("expected PH,E but got '{}'", s))?;
    let ph = ph.trim().parse::<f64>().map_err(|err| format!("bad pH '{}': {}", ph, err))?;
    let e = e.trim().parse::<f64>().map_err(|err| format!("bad potential '{}': {}", e, err))?;
    Ok(Probe { ph, e })
}

#[derive(Parser, Debug)]
#[command(name = "fe-pourbaix")]
#[command(about = "Fe–H2O Pourbaix diagram: stable phases and precipitation over pH and potential", long_about = None)]
struct Cli {
    /// Temperature in °C
    #[arg(long, default_value_t = 25.0, env = "FE_POURBAIX_TEMP_C", allow_hyphen_values = true)]
    temp_c: f64,

    /// log10 activity of Fe2+
    #[arg(long, default_value_t = -6.0, env = "FE_POURBAIX_LOG_A_FE2", allow_hyphen_values = true)]
    log_a_fe2: f64,

    /// log10 activity of Fe3+
    #[arg(long, default_value_t = -6.0, env = "FE_POURBAIX_LOG_A_FE3", allow_hyphen_values = true)]
    log_a_fe3: f64,

    /// Solid pair in the comparison: oxides or hydroxides
    #[arg(long, default_value = "oxides", env = "FE_POURBAIX_PHASE_FAMILY")]
    phase_family: PhaseFamily,

    /// Samples along each axis
    #[arg(long, default_value_t = 600, env = "FE_POURBAIX_RESOLUTION")]
    resolution: usize,

    /// Skip the pairwise boundary differences
    #[arg(long, default_value_t = false, env = "FE_POURBAIX_NO_BOUNDARIES")]
    no_boundaries: bool,

    /// precipitation-only or phase-colors
    #[arg(long, default_value = "precipitation-only", env = "FE_POURBAIX_RENDER_MODE")]
    render_mode: RenderMode,

    /// Terminal map width in characters
    #[arg(long, default_value_t = 70, env = "FE_POURBAIX_WIDTH")]
    width: usize,

    /// Terminal map height in characters
    #[arg(long, default_value_t = 28, env = "FE_POURBAIX_HEIGHT")]
    height: usize,

    /// Print the diagram summary as JSON instead of the map
    #[arg(long, default_value_t = false, env = "FE_POURBAIX_JSON")]
    json: bool,

    /// Print every species potential and the winner at PH,E
    #[arg(long, value_name = "PH,E", value_parser = parse_probe, env = "FE_POURBAIX_PROBE", allow_hyphen_values = true)]
    probe: Option<Probe>,
}

impl Cli {
    fn config(&self) -> DiagramConfig {
        DiagramConfig::new(
            ChemistryParameters::default()
                .with_temperature(self.temp_c)
                .with_log_activities(self.log_a_fe2, self.log_a_fe3)
                .with_phase_family(self.phase_family),
            GridSpec::with_resolution(self.resolution),
            DiagramOptions::new()
                .with_boundaries(!self.no_boundaries)
                .with_render_mode(self.render_mode),
        )
    }
}

fn print_probe(diagram: &PourbaixDiagram, constants: &ThermodynamicConstants, probe: Probe) -> Result<()> {
    println!("Stability potentials at pH {}, E {} V:", probe.ph, probe.e);
    let mut winner = None;
    for species in diagram.species() {
        let psi = stability_potential(*species, &diagram.params, constants, probe.ph, probe.e)?;
        println!("  {:<8} {:>12.6}", species.as_str(), psi);
        // strict comparison keeps the first species on ties
        if !psi.is_nan() && winner.is_none_or(|(_, best)| psi < best) {
            winner = Some((*species, psi));
        }
    }
    if let Some((species, _)) = winner {
        let solid = species.descriptor().solid;
        println!(
            "Stable: {}{}",
            species,
            if solid { " (precipitates)" } else { "" }
        );
    }
    if let Some(nearest) = diagram.stable_species_near(probe.ph, probe.e) {
        println!("Nearest grid cell: {}", nearest);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let constants = ThermodynamicConstants::standard();
    let config = cli.config();
    let diagram = config.build(constants)?;

    if let Some(probe) = cli.probe {
        return print_probe(&diagram, constants, probe);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&diagram.summary())?);
    } else {
        let view = TerminalView::new(cli.width, cli.height);
        info!("rendering {} view", view.name());
        print!("{}", view.render(&diagram));
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("fe-pourbaix: {}", err);
        process::exit(1);
    }
}
