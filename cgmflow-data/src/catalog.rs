//! Static reference data for the questions.
//!
//! The device list here is the built-in catalog. The eligible devices for a particular patient
//! come from the eligibility service and are mapped into the same [`Device`] shape.

use std::borrow::Cow;
use super::{DeviceId, TimeRangeId};

/// A device a patient can pick
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Device {
  pub id: DeviceId,
  pub name: String,
  pub description: String,
  pub image: String,
}

/// Built-in catalog entry
#[derive(Debug, PartialEq)]
pub struct CatalogDevice {
  pub id: &'static str,
  pub name: &'static str,
  pub description: &'static str,
  pub image: &'static str,
}

impl CatalogDevice {
  pub fn to_device(&self) -> Device {
    Device {
      id: DeviceId::from(self.id),
      name: self.name.to_owned(),
      description: self.description.to_owned(),
      image: self.image.to_owned(),
    }
  }

  /// `other` and `no-preference` are answers, not devices that can be shipped
  pub fn is_placeholder(&self) -> bool {
    self.id == "other" || self.id == "no-preference"
  }
}

#[derive(Debug, PartialEq)]
pub struct TimeRange {
  pub id: &'static str,
  pub label: &'static str,
}

pub static DEVICES: [CatalogDevice; 6] = [
  CatalogDevice {
    id: "dexcom-g7",
    name: "Dexcom G7",
    description: "The most advanced CGM system with a sleek, all-in-one design and real-time glucose readings.",
    image: "📱",
  },
  CatalogDevice {
    id: "dexcom-g6",
    name: "Dexcom G6",
    description: "Proven CGM technology with no fingersticks required and seamless smartphone integration.",
    image: "📲",
  },
  CatalogDevice {
    id: "libre-freestyle-3",
    name: "Libre FreeStyle 3",
    description: "Small, discreet sensor with continuous glucose monitoring and smartphone alerts.",
    image: "⌚",
  },
  CatalogDevice {
    id: "libre-14-day",
    name: "Libre 14 Day",
    description: "Affordable CGM option with 14-day wear time and easy scanning technology.",
    image: "🔍",
  },
  CatalogDevice {
    id: "other",
    name: "I don't see my device",
    description: "Select this option if your device is not listed above.",
    image: "❓",
  },
  CatalogDevice {
    id: "no-preference",
    name: "No Preference",
    description: "I would like assistance in choosing the right device for me.",
    image: "💡",
  },
];

pub static DEVICE_UPDATE_RANGES: [TimeRange; 4] = [
  TimeRange { id: "0-1-year", label: "0-1 Year" },
  TimeRange { id: "1-3-years", label: "1-3 Years" },
  TimeRange { id: "3-4-years", label: "3-4 Years" },
  TimeRange { id: "5-plus-years", label: "5+ Years" },
];

pub static SENSORS_ORDERED_RANGES: [TimeRange; 4] = [
  TimeRange { id: "0-1-months", label: "0-1 months" },
  TimeRange { id: "1-3-months", label: "1-3 months" },
  TimeRange { id: "3-6-months", label: "3-6 months" },
  TimeRange { id: "6-plus-months", label: "6+ months" },
];

pub fn find_device(id: &DeviceId) -> Option<&'static CatalogDevice> {
  DEVICES.iter().find(|device| *id == device.id)
}

/// Display name for a device, the raw id when the catalog doesn't know it
pub fn device_name(id: &DeviceId) -> Cow<'static, str> {
  match find_device(id) {
    Some(device) => Cow::Borrowed(device.name),
    None => Cow::Owned(id.as_str().to_owned()),
  }
}

pub fn contains_range(ranges: &[TimeRange], id: &TimeRangeId) -> bool {
  ranges.iter().any(|range| *id == range.id)
}

/// Display label for a time range, the raw id when it isn't one of `ranges`
pub fn time_range_label(ranges: &'static [TimeRange], id: &TimeRangeId) -> Cow<'static, str> {
  match ranges.iter().find(|range| *id == range.id) {
    Some(range) => Cow::Borrowed(range.label),
    None => Cow::Owned(id.as_str().to_owned()),
  }
}

/// The catalog devices that can actually be shipped
pub fn shippable_devices() -> Vec<Device> {
  DEVICES.iter()
    .filter(|device| !device.is_placeholder())
    .map(CatalogDevice::to_device)
    .collect()
}


#[cfg(test)]
mod tests {
  use crate::{DeviceId, TimeRangeId};
  use super::{device_name, time_range_label, shippable_devices, DEVICE_UPDATE_RANGES, SENSORS_ORDERED_RANGES};

  #[test]
  fn names() {
    assert_eq!(device_name(&DeviceId::from("dexcom-g7")), "Dexcom G7");
    assert_eq!(device_name(&DeviceId::OTHER), "I don't see my device");
    assert_eq!(device_name(&DeviceId::from("libre-3")), "libre-3");
  }

  #[test]
  fn labels() {
    assert_eq!(time_range_label(&DEVICE_UPDATE_RANGES, &TimeRangeId::FIVE_PLUS_YEARS), "5+ Years");
    assert_eq!(time_range_label(&SENSORS_ORDERED_RANGES, &"1-3-months".into()), "1-3 months");
    assert_eq!(time_range_label(&SENSORS_ORDERED_RANGES, &TimeRangeId::FIVE_PLUS_YEARS), "5-plus-years");
  }

  #[test]
  fn shippable() {
    let devices = shippable_devices();
    assert_eq!(devices.len(), 4);
    assert!(devices.iter().all(|device| !device.id.is_other() && device.id != "no-preference"));
  }
}
