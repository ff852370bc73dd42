//! Redraw scheduling: push dirty pages to the device
//!
//! A page goes out as page-select, the two column-address commands, then its
//! bytes in one data transfer. Only pages that changed are sent by [`flush`];
//! [`full_redraw`] sends everything.
//!
//! A page whose transfer fails keeps (or gains) its dirty marking so the next
//! [`flush`] resends it. Other pages are still attempted.

use crate::buffer::PageBuffer;
use crate::config::FlushMode;
use crate::sh1106::cmd::Cmd;
use crate::sh1106::{GLYPH_WIDTH, PAGES};
use crate::transport::{BusError, Transport};

/// Outcome of one flush or full redraw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Pages that reached the device, ascending
    pub flushed: Vec<usize>,
    /// Pages that did not, with the transport error
    pub failed: Vec<(usize, BusError)>,
}

impl FlushReport {
    /// Fold a later report into this one; `flushed` stays ascending without
    /// repeats, `failed` keeps every attempt in order
    pub fn merge(&mut self, other: FlushReport) {
        self.flushed.extend(other.flushed);
        self.flushed.sort_unstable();
        self.flushed.dedup();
        self.failed.extend(other.failed);
    }

    /// True when no page failed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Indices of the pages that failed
    pub fn failed_pages(&self) -> Vec<usize> {
        self.failed.iter().map(|(page, _)| *page).collect()
    }
}

/// Send every dirty page, in ascending order, and mark the sent ones clean.
pub fn flush<T: Transport>(
    buffer: &mut PageBuffer,
    transport: &mut T,
    column_bias: u8,
    mode: FlushMode,
) -> FlushReport {
    let mut report = FlushReport::default();
    let last_column = buffer.geometry().columns().saturating_sub(1);
    let dirty: Vec<(usize, (usize, usize))> = buffer
        .descriptors()
        .iter()
        .enumerate()
        .filter_map(|(page, desc)| desc.dirty_columns().map(|range| (page, range)))
        .collect();

    for (page, (first, last)) in dirty {
        let columns = match mode {
            FlushMode::FullPage => (0, last_column),
            FlushMode::DirtySpan => (first, last),
        };

        match send_page(buffer, transport, page, columns, column_bias) {
            Ok(sent) => {
                log::debug!("Flushed page {} ({} bytes)", page, sent);
                buffer.mark_clean(page);
                report.flushed.push(page);
            }
            Err(e) => {
                log::error!("Failed to flush page {}: {:?}", page, e);
                report.failed.push((page, e));
            }
        }
    }
    report
}

/// Send every page regardless of dirty state. Sent pages end up clean, failed
/// ones fully dirty.
pub fn full_redraw<T: Transport>(
    buffer: &mut PageBuffer,
    transport: &mut T,
    column_bias: u8,
) -> FlushReport {
    let mut report = FlushReport::default();
    let geometry = buffer.geometry();
    let last_column = geometry.columns().saturating_sub(1);

    for page in 0..geometry.pages {
        match send_page(buffer, transport, page, (0, last_column), column_bias) {
            Ok(_) => {
                buffer.mark_clean(page);
                report.flushed.push(page);
            }
            Err(e) => {
                log::error!("Failed to redraw page {}: {:?}", page, e);
                buffer.mark_all(page);
                report.failed.push((page, e));
            }
        }
    }
    log::debug!(
        "Full redraw: {} pages sent, {} failed",
        report.flushed.len(),
        report.failed.len()
    );
    report
}

/// Address `page` at the first of `columns` and stream the inclusive glyph
/// column range. Returns the number of data bytes sent.
fn send_page<T: Transport>(
    buffer: &PageBuffer,
    transport: &mut T,
    page: usize,
    (first, last): (usize, usize),
    column_bias: u8,
) -> Result<usize, BusError> {
    if transport.is_busy()? {
        log::warn!("Device busy, skipping page {}", page);
        return Err(BusError::Busy);
    }

    // the page-select command only carries PAGES distinct addresses
    if page >= PAGES {
        return Err(BusError::OutOfBounds);
    }
    let bytes = buffer.page(page).ok_or(BusError::OutOfBounds)?;
    let start = first * GLYPH_WIDTH;
    let end = ((last + 1) * GLYPH_WIDTH).min(bytes.len());
    let data = bytes.get(start..end).ok_or(BusError::OutOfBounds)?;

    let page_address = u8::try_from(page).map_err(|_| BusError::OutOfBounds)?;
    let column = u8::try_from(start).map_err(|_| BusError::OutOfBounds)?;

    transport.send_command(Cmd::page_address(page_address))?;
    for command in Cmd::column_address(column, column_bias) {
        transport.send_command(command)?;
    }
    transport.send_data(data)?;
    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sh1106::{Geometry, COLUMN_BIAS, WIDTH};
    use crate::transport::{Frame, RecordingTransport};

    fn setup() -> (PageBuffer, RecordingTransport) {
        (
            PageBuffer::new(Geometry::SH1106_128X64).unwrap(),
            RecordingTransport::new(),
        )
    }

    #[test]
    fn clean_buffer_sends_nothing() {
        let (mut buf, mut t) = setup();
        let report = flush(&mut buf, &mut t, COLUMN_BIAS, FlushMode::FullPage);
        assert_eq!(report, FlushReport::default());
        assert!(t.transcript().is_empty());
    }

    #[test]
    fn only_dirty_pages_go_out_in_order() {
        let (mut buf, mut t) = setup();
        buf.write_region(6, 0, &[1; 8]).unwrap();
        buf.write_region(1, 4, &[2; 8]).unwrap();

        let report = flush(&mut buf, &mut t, COLUMN_BIAS, FlushMode::FullPage);
        assert_eq!(report.flushed, vec![1, 6]);
        assert_eq!(t.selected_pages(), vec![1, 6]);
        assert_eq!(t.data_len(), 2 * WIDTH);
        assert_eq!(buf.dirty_pages().count(), 0);

        for page in [1, 6] {
            assert_eq!(
                t.visible_page(page, COLUMN_BIAS, WIDTH).unwrap(),
                buf.page(page).unwrap()
            );
        }
    }

    #[test]
    fn second_flush_is_empty() {
        let (mut buf, mut t) = setup();
        buf.write_region(0, 0, &[9; 8]).unwrap();
        flush(&mut buf, &mut t, COLUMN_BIAS, FlushMode::FullPage);
        t.clear_transcript();

        let report = flush(&mut buf, &mut t, COLUMN_BIAS, FlushMode::FullPage);
        assert!(report.flushed.is_empty());
        assert!(t.transcript().is_empty());
    }

    #[test]
    fn dirty_span_sends_only_touched_columns() {
        let (mut buf, mut t) = setup();
        buf.write_region(2, 3, &[0xAA; 16]).unwrap();

        flush(&mut buf, &mut t, COLUMN_BIAS, FlushMode::DirtySpan);
        // column 24 + bias 2 = 26 = 0x1A
        assert_eq!(
            t.transcript(),
            &[
                Frame::Command(0xB2),
                Frame::Command(0x11),
                Frame::Command(0x0A),
                Frame::Data(vec![0xAA; 16]),
            ]
        );
        assert_eq!(
            t.visible_page(2, COLUMN_BIAS, WIDTH).unwrap(),
            buf.page(2).unwrap()
        );
    }

    #[test]
    fn failed_page_stays_dirty_and_others_proceed() {
        let (mut buf, mut t) = setup();
        buf.write_region(1, 0, &[1; 8]).unwrap();
        buf.write_region(2, 0, &[2; 8]).unwrap();
        buf.write_region(3, 0, &[3; 8]).unwrap();
        t.fail_page(2);

        let report = flush(&mut buf, &mut t, COLUMN_BIAS, FlushMode::FullPage);
        assert_eq!(report.flushed, vec![1, 3]);
        assert_eq!(report.failed, vec![(2, BusError::Write)]);
        assert!(!report.is_complete());
        assert_eq!(buf.dirty_pages().collect::<Vec<_>>(), vec![2]);
        assert_eq!(buf.descriptor(2).unwrap().dirty_columns(), Some((0, 0)));

        t.heal();
        let retry = flush(&mut buf, &mut t, COLUMN_BIAS, FlushMode::FullPage);
        assert_eq!(retry.flushed, vec![2]);
        assert!(retry.is_complete());
    }

    #[test]
    fn busy_device_fails_every_page() {
        let (mut buf, mut t) = setup();
        buf.write_region(0, 0, &[1; 8]).unwrap();
        buf.write_region(5, 0, &[1; 8]).unwrap();
        t.set_busy(true);

        let report = flush(&mut buf, &mut t, COLUMN_BIAS, FlushMode::FullPage);
        assert_eq!(report.failed, vec![(0, BusError::Busy), (5, BusError::Busy)]);
        assert!(t.transcript().is_empty());
        assert_eq!(buf.dirty_pages().count(), 2);
    }

    #[test]
    fn full_redraw_sends_every_page_and_cleans() {
        let (mut buf, mut t) = setup();
        buf.write_region(4, 0, &[1; 8]).unwrap();
        buf.fill(0xFF);

        let report = full_redraw(&mut buf, &mut t, COLUMN_BIAS);
        assert_eq!(report.flushed, (0..8).collect::<Vec<_>>());
        assert_eq!(t.data_len(), 1024);
        assert_eq!(buf.dirty_pages().count(), 0);
        for page in 0..8 {
            assert_eq!(t.visible_page(page, COLUMN_BIAS, WIDTH).unwrap(), &[0xFF; WIDTH][..]);
        }
    }

    #[test]
    fn full_redraw_failure_marks_page_for_retry() {
        let (mut buf, mut t) = setup();
        t.fail_page(7);

        let report = full_redraw(&mut buf, &mut t, COLUMN_BIAS);
        assert_eq!(report.failed_pages(), vec![7]);
        assert_eq!(buf.descriptor(7).unwrap().dirty_columns(), Some((0, 15)));
    }

    #[test]
    fn merged_reports_list_each_page_once() {
        let mut total = FlushReport::default();
        total.merge(FlushReport { flushed: vec![3], failed: vec![] });
        total.merge(FlushReport { flushed: vec![4], failed: vec![(6, BusError::Busy)] });
        total.merge(FlushReport { flushed: vec![3, 5], failed: vec![] });
        assert_eq!(total.flushed, vec![3, 4, 5]);
        assert_eq!(total.failed, vec![(6, BusError::Busy)]);
        assert!(!total.is_complete());
    }
}
