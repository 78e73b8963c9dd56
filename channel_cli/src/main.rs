//! # OpenChannel CLI
//!
//! Interactive front end for the channel_core calculation engine: pick a
//! cross-section shape, describe the channel, and solve either direction
//! of Manning's equation (depth → discharge or discharge → normal depth).

use std::io::{self, BufRead, Write};

use channel_core::flow::Flow;
use channel_core::sections::{CircularSection, RectangularSection, Section, TrapezoidalSection};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_choice(prompt: &str, default: char) -> char {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().to_lowercase().chars().next().unwrap_or(default)
}

fn build_section(shape: char) -> Result<Section, channel_core::ChannelError> {
    match shape {
        't' => {
            let base_width = prompt_f64("Base width [2.0]: ", 2.0);
            let side_slope_1 = prompt_f64("Left side slope (H:V) [1.0]: ", 1.0);
            let side_slope_2 = prompt_f64("Right side slope (H:V) [1.0]: ", 1.0);
            Ok(Section::Trapezoidal(TrapezoidalSection::new(
                base_width,
                side_slope_1,
                side_slope_2,
            )?))
        }
        'c' => {
            let radius = prompt_f64("Pipe radius [1.0]: ", 1.0);
            Ok(Section::Circular(CircularSection::new(radius)?))
        }
        _ => {
            let base_width = prompt_f64("Base width [4.0]: ", 4.0);
            Ok(Section::Rectangular(RectangularSection::new(base_width)?))
        }
    }
}

fn main() {
    // Solver warnings (pressurized pipe flow) surface through the logger.
    env_logger::init();

    println!("OpenChannel CLI - Uniform Flow Calculator");
    println!("=========================================");
    println!();

    let shape = prompt_choice("Section shape - [r]ectangular, [t]rapezoidal, [c]ircular [r]: ", 'r');
    let section = match build_section(shape) {
        Ok(section) => section,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let bottom_slope = prompt_f64("Bottom slope (m/m) [0.003]: ", 0.003);
    let roughness = prompt_f64("Manning roughness n [0.03]: ", 0.03);

    let mode = prompt_choice("Solve from [d]epth or [q] discharge? [d]: ", 'd');

    let flow = if mode == 'q' {
        let discharge = prompt_f64("Discharge [5.0]: ", 5.0);
        Flow::new(section, bottom_slope, roughness, Some(discharge))
    } else {
        let depth = prompt_f64("Flow depth [1.0]: ", 1.0);
        let mut section = section;
        section
            .set_flow_depth(depth)
            .and_then(|()| Flow::new(section, bottom_slope, roughness, None))
    };

    match flow {
        Ok(flow) => {
            let section = flow.section();
            println!();
            println!("═══════════════════════════════════════");
            println!("  UNIFORM FLOW RESULTS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Section:  {}", section);
            println!("Slope:    {} m/m", flow.bottom_slope());
            println!("n:        {}", flow.manning_roughness_coefficient());
            println!();
            if let (Some(depth), Some(discharge)) = (flow.normal_depth(), flow.discharge()) {
                println!("Normal depth: {:.6}", depth);
                println!("Discharge:    {:.6}", discharge);
            }
            if let (Ok(area), Ok(perimeter), Ok(radius)) =
                (section.area(), section.perimeter(), section.hydraulic_radius())
            {
                println!("Area:             {:.6}", area);
                println!("Wetted perimeter: {:.6}", perimeter);
                println!("Hydraulic radius: {:.6}", radius);
            }
            if let Ok(centroid) = section.centroid() {
                println!("Centroid:         ({:.6}, {:.6})", centroid.x, centroid.y);
            }
            println!();
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Output (for API use):");
            if let Ok(json) = serde_json::to_string_pretty(&flow) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}
