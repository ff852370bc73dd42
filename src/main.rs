//! Host-side walkthrough of the driver against a recording transport.
//!
//! Runs the usual bring-up (fill white, clear) and then the character, string
//! and counter exercises, logging how much bus traffic each one needed.
//! `RUST_LOG=debug` shows every page flush.

use anyhow::Context;
use embedded_hal::delay::DelayNs;

use sh1106_paged::sh1106::WIDTH;
use sh1106_paged::{Config, FlushReport, RecordingTransport, Sh1106};

type Oled = Sh1106<RecordingTransport, HostDelay>;

/// Delays are skipped; nothing physical is waiting on them
struct HostDelay;

impl DelayNs for HostDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn report(label: &str, oled: &mut Oled, flush: &FlushReport) {
    log::info!(
        "{}: pages {:?} sent, {} data bytes on the bus, {} failed",
        label,
        flush.flushed,
        oled.transport().data_len(),
        flush.failed.len()
    );
    oled.transport_mut().clear_transcript();
}

fn cycle_through_chars(oled: &mut Oled) -> anyhow::Result<()> {
    let mut total = FlushReport::default();
    let runs = [('a'..='z', 3), ('A'..='Z', 4), ('0'..='9', 5)];
    for (chars, page) in runs {
        for ch in chars {
            oled.insert_char(ch, page)?;
            total.merge(oled.flush()?);
        }
    }
    report("cycle through chars", oled, &total);
    Ok(())
}

fn write_strings(oled: &mut Oled) -> anyhow::Result<()> {
    for (page, text) in [(2, "Test 1"), (3, "Test 2"), (4, "Test 3")] {
        oled.write_text(text, page, 0, text.len() * 8)
            .with_context(|| format!("writing {text:?}"))?;
    }
    let flush = oled.flush()?;
    report("write strings", oled, &flush);
    Ok(())
}

fn print_all_chars(oled: &mut Oled) -> anyhow::Result<()> {
    oled.write_text("0123456789", 5, 0, 8 * 10)?;
    oled.write_text("abcdefghijklmnop", 6, 0, WIDTH)?;
    oled.write_text("qrstuvwxyz", 7, 0, 8 * 10)?;
    let flush = oled.flush()?;
    report("print all chars", oled, &flush);
    Ok(())
}

fn incrementing_number(oled: &mut Oled) -> anyhow::Result<()> {
    let mut sent = 0;
    for value in 0..=1000u32 {
        let digits = format!("{value:>4}");
        oled.write_text(&digits, 3, 0, digits.len() * 8)?;
        sent += oled.flush()?.flushed.len();
    }
    log::info!("incrementing number: {} page flushes", sent);
    oled.transport_mut().clear_transcript();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::new();
    let mut oled = Sh1106::new(RecordingTransport::new(), HostDelay, config)
        .context("Could not create SH1106 session")?;
    oled.begin().context("SH1106 bring-up failed")?;
    oled.transport_mut().clear_transcript();

    // set buffer to all 0xFF, then back to all 0x00
    let white = oled.set_all()?;
    report("set all", &mut oled, &white);
    let black = oled.clear()?;
    report("clear", &mut oled, &black);

    cycle_through_chars(&mut oled)?;
    oled.clear()?;
    write_strings(&mut oled)?;
    oled.clear()?;
    print_all_chars(&mut oled)?;
    oled.clear()?;
    incrementing_number(&mut oled)?;

    let (transport, _) = oled.release();
    for page in 0..config.geometry.pages {
        let lit = transport
            .visible_page(page, config.column_bias, config.geometry.width)
            .map_or(0, |bytes| bytes.iter().filter(|&&b| b != 0).count());
        log::info!("page {}: {} lit columns", page, lit);
    }
    Ok(())
}
