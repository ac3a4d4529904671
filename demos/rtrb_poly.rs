/// Polyphony over a lock-free queue: events are pushed from a "UI" side and
/// drained by the engine once per block, the way an audio callback would.
use rtrb::RingBuffer;
use vanalog::{voices, Note, SynthNode, TimedEvent, VAnalog};

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

fn main() -> vanalog::Result<()> {
    println!("=== Lock-Free Polyphony Example ===\n");

    let sample_rate = 48_000.0;
    let block = 256;
    let block_secs = block as f64 / sample_rate as f64;

    // Create message queue
    let (mut tx, mut rx) = RingBuffer::<TimedEvent>::new(64);

    // Step 1: Load a patch
    let patch = voices::pluck();
    let mut synth = VAnalog::from_patch(&patch);
    println!("Loaded preset '{}'\n", patch.name);

    // Step 2: Queue a C major chord
    println!("Playing C major chord:");
    for name in ["C4", "E4", "G4"] {
        let note: Note = name.parse()?;
        println!("  Note On: {note} ({})", note.number());
        let _ = tx.push(TimedEvent::note_on(0.0, note));
    }

    // Step 3: Render, draining the queue at the top of every block
    println!();
    for index in 0..40 {
        let time = index as f64 * block_secs;

        if index == 20 {
            println!("Releasing chord at {time:.3}s");
            for number in [60, 64, 67] {
                let _ = tx.push(TimedEvent::note_off(time, Note::new(number)));
            }
        }

        synth.drain_events(&mut rx);
        synth.update(time, sample_rate, block)?;

        if index % 5 == 0 {
            println!(
                "  block {index:2}  t={time:.3}s  voices={}  peak={:.3}",
                synth.active_notes().len(),
                peak(synth.output())
            );
        }
    }

    println!("\nVoices still sounding: {}", synth.active_notes().len());
    Ok(())
}
