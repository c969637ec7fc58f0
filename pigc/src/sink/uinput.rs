use std::io;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, BusType, EventType, InputEvent, InputId, Key};
use log::info;

use super::EventSink;
use crate::error::{Error, Result};
use crate::event::KeyEvent;
use crate::keycode::KeyCode;

/// Name of the virtual keyboard
pub const DEVICE_NAME: &str = "pigc-gamepad device";

const VENDOR_ID: u16 = 1;
const PRODUCT_ID: u16 = 1;
const VERSION: u16 = 4;

/// Virtual keyboard created through `/dev/uinput`.
///
/// Keys are registered before [`UinputSink::create`]; events can only be
/// emitted after it. The device is destroyed on drop.
pub struct UinputSink {
    keys: AttributeSet<Key>,
    device: Option<VirtualDevice>,
}

impl Default for UinputSink {
    fn default() -> Self {
        Self::new()
    }
}

impl UinputSink {
    pub fn new() -> Self {
        Self {
            keys: AttributeSet::new(),
            device: None,
        }
    }

    /// Create the virtual device with every registered key.
    pub fn create(&mut self) -> Result<()> {
        if self.device.is_some() {
            return Err(Error::Sink(io::Error::new(io::ErrorKind::AlreadyExists, "uinput device already created")));
        }
        let device = VirtualDeviceBuilder::new()
            .and_then(|builder| {
                builder
                    .name(DEVICE_NAME)
                    .input_id(InputId::new(BusType::BUS_USB, VENDOR_ID, PRODUCT_ID, VERSION))
                    .with_keys(&self.keys)
            })
            .and_then(|builder| builder.build())
            .map_err(Error::Sink)?;
        info!("Created uinput device \"{DEVICE_NAME}\"");
        self.device = Some(device);
        Ok(())
    }
}

impl EventSink for UinputSink {
    fn register_key(&mut self, key: KeyCode) -> Result<()> {
        if self.device.is_some() {
            return Err(Error::Sink(io::Error::new(io::ErrorKind::AlreadyExists, "cannot add keys to a created uinput device")));
        }
        self.keys.insert(Key::new(key.code()));
        Ok(())
    }

    fn emit(&mut self, event: KeyEvent) -> Result<()> {
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| Error::Sink(io::Error::new(io::ErrorKind::NotConnected, "uinput device not created")))?;
        // emit() appends the SYN_REPORT
        device
            .emit(&[InputEvent::new(EventType::KEY, event.key.code(), event.value())])
            .map_err(Error::Sink)
    }
}
