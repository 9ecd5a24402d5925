use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use ssd1322::command::{
    ACTIVATE_SCROLL, DEACTIVATE_SCROLL, DISPLAY_ON, RIGHT_HORIZONTAL_SCROLL, SET_COLUMN_ADDR,
    SET_ROW_ADDR, WRITE_RAM,
};
use ssd1322::{
    BusMode, Builder, Color, Dimensions, Display, DisplayInterface, GraphicDisplay,
};

/// Bus traffic as seen by the panel
#[derive(Debug, PartialEq)]
enum Event {
    Command(u8),
    Data(Vec<u8>),
    Reset,
}

#[derive(Default)]
struct RecordingInterface {
    events: Vec<Event>,
}

impl RecordingInterface {
    fn commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Command(cmd) => Some(*cmd),
                _ => None,
            })
            .collect()
    }

    /// Data blocks sent after the last write-RAM command
    fn last_frame(&self) -> Vec<u8> {
        let start = self
            .events
            .iter()
            .rposition(|event| *event == Event::Command(WRITE_RAM))
            .expect("no write-RAM command recorded");
        self.events[start + 1..]
            .iter()
            .filter_map(|event| match event {
                Event::Data(data) => Some(data.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

impl DisplayInterface for RecordingInterface {
    type Error = Infallible;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.events.push(Event::Command(command));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.events.push(Event::Data(data.to_vec()));
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.events.push(Event::Reset);
        Ok(())
    }

    fn bus_mode(&self) -> BusMode {
        BusMode::HardwareSpi
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn setup_panel() -> GraphicDisplay<RecordingInterface, Vec<u8>> {
    let config = Builder::new()
        .dimensions(Dimensions::new(64, 256).unwrap())
        .build()
        .unwrap();
    let display = Display::new(RecordingInterface::default(), config);
    let mut panel = GraphicDisplay::new(display, vec![0u8; 8192]).unwrap();
    panel.begin(&mut NoDelay).unwrap();
    panel.display_mut().interface_mut().events.clear();
    panel
}

#[test]
fn begin_resets_then_turns_panel_on() {
    let config = Builder::new()
        .dimensions(Dimensions::new(64, 256).unwrap())
        .build()
        .unwrap();
    let mut display = Display::new(RecordingInterface::default(), config);
    display.begin(&mut NoDelay).unwrap();

    let interface = display.release();
    assert_eq!(interface.events.first(), Some(&Event::Reset));
    assert_eq!(interface.events.last(), Some(&Event::Command(DISPLAY_ON)));
}

#[test]
fn cleared_frame_flushes_as_single_zero_block() {
    let mut panel = setup_panel();
    panel.clear_display();
    panel.flush(false).unwrap();

    let interface = panel.display().interface();
    assert_eq!(
        interface.events[..4],
        [
            Event::Command(SET_COLUMN_ADDR),
            Event::Data(vec![0x1C, 0x5B]),
            Event::Command(SET_ROW_ADDR),
            Event::Data(vec![0x00, 0x3F]),
        ]
    );
    assert_eq!(interface.commands().last(), Some(&WRITE_RAM));

    let frame = interface.last_frame();
    assert_eq!(frame.len(), 8192);
    assert!(frame.iter().all(|&b| b == 0));
}

#[test]
fn filled_frame_packs_both_nibbles() {
    let mut panel = setup_panel();
    panel.fill(0x7);
    panel.flush(false).unwrap();

    let frame = panel.display().interface().last_frame();
    assert!(frame.iter().all(|&b| b == 0x77));
}

#[test]
fn hline_past_right_edge_is_clipped() {
    let mut panel = setup_panel();
    panel.draw_fast_hline(254, 0, 10, Color::On);

    let fb = panel.framebuffer();
    assert_eq!(fb.pixel(254, 0), Some(0xF));
    assert_eq!(fb.pixel(255, 0), Some(0xF));
    // row 1 untouched
    assert_eq!(fb.pixel(0, 1), Some(0x0));
    assert_eq!(fb.as_bytes().iter().filter(|&&b| b != 0).count(), 1);

    panel.flush(true).unwrap();
    let frame = panel.display().interface().last_frame();
    assert_eq!(frame[127], 0xFF);
    assert!(panel.framebuffer().as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn scroll_right_then_stop() {
    let mut panel = setup_panel();
    panel.display_mut().start_scroll_right(0, 7).unwrap();
    assert!(panel.display().scroll().is_some());

    panel.display_mut().stop_scroll().unwrap();
    assert!(panel.display().scroll().is_none());

    let interface = panel.display().interface();
    assert_eq!(
        interface.events,
        vec![
            Event::Command(RIGHT_HORIZONTAL_SCROLL),
            Event::Data(vec![0x00, 0x00, 0x00, 0x07, 0x00, 0xFF]),
            Event::Command(ACTIVATE_SCROLL),
            Event::Command(DEACTIVATE_SCROLL),
        ]
    );
}

#[test]
fn bitmap_lands_at_offset_and_clips() {
    let mut panel = setup_panel();
    // 8x2 glyph: top row solid, bottom row left half
    let glyph = [0xFF, 0xF0];
    panel.fast_draw_bitmap(252, 62, &glyph, 8, 2, Color::Gray(0xA));

    let fb = panel.framebuffer();
    assert_eq!(fb.pixel(252, 62), Some(0xA));
    assert_eq!(fb.pixel(255, 62), Some(0xA));
    assert_eq!(fb.pixel(255, 63), Some(0xA));
    assert_eq!(fb.pixel(251, 62), Some(0x0));
    assert_eq!(fb.as_bytes().iter().filter(|&&b| b != 0).count(), 4);
}
