//! Prints every waveform shape as a lookup-table sparkline.
//!
//! Run with an optional frequency, e.g. `cargo run --example waveform_luts -- 3`.

use anyhow::{Context, Result};
use tonecurve::{
    Channel, CurveSet, DefaultCurve, LUT_SIZE, Lut, WaveformKind, WaveformParameters, generate,
    normalize,
};

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const COLUMNS: usize = 64;

fn sparkline(lut: &Lut) -> String {
    let step = LUT_SIZE / COLUMNS;
    lut.values()
        .iter()
        .step_by(step)
        .map(|v| BARS[((v * (BARS.len() - 1) as f64).round() as usize).min(BARS.len() - 1)])
        .collect()
}

fn main() -> Result<()> {
    let frequency = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<f64>()
            .with_context(|| format!("invalid frequency: {arg}"))?,
        None => 2.0,
    };

    println!("Waveforms at frequency {frequency}:\n");
    for kind in WaveformKind::ALL {
        let params = WaveformParameters::new(kind).with_frequency(frequency);
        let curve = generate(&params);
        println!("{:<12} {:>3} pts  {}", kind.name(), curve.len(), sparkline(&curve.lut()));
    }

    println!("\nInverted, offset by a quarter cycle:\n");
    for kind in WaveformKind::ALL.into_iter().filter(|k| k.is_periodic()) {
        let params = WaveformParameters::new(kind)
            .with_frequency(frequency)
            .with_offset(0.25)
            .with_invert(true);
        println!("{:<12}           {}", kind.name(), sparkline(&generate(&params).lut()));
    }

    // A curve set driven entirely by generators, then applied to a colour
    let mut curves = CurveSet::new(DefaultCurve::Identity);
    curves.apply_waveform(Channel::Red, &WaveformParameters::new(WaveformKind::Sine));
    curves.apply_waveform(
        Channel::Blue,
        &WaveformParameters::new(WaveformKind::Linear).with_invert(true),
    );
    let luts = curves.luts();
    println!("\nRGB (0.25, 0.5, 0.75) -> {:.3?}", luts.apply_rgb([0.25, 0.5, 0.75]));

    let mut table: Vec<f64> = (0..LUT_SIZE).map(|i| i as f64 / 100.0 - 0.5).collect();
    normalize(&mut table);
    println!(
        "Normalized ramp spans [{:.3}, {:.3}]",
        table.first().copied().unwrap_or_default(),
        table.last().copied().unwrap_or_default()
    );

    println!("\nPersisted curves:\n{}", curves.to_json());
    Ok(())
}
