//! Material volume sums over `Volume`-typed quantitative properties.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::{Direction, Value};
use crate::response::MaterialVolume;
use crate::storage::StorageBackend;
use crate::Result;
use super::schema;

pub const VOLUME_TYPE: &str = "Volume";

const TYPE: &str = "type";
const VALUE_M3: &str = "value_m3";
const MATERIAL_ID: &str = "material_id";

/// Sum volumes per material display name, largest first.
///
/// With `building_id`, only quantitative properties whose `building_id`
/// equals it count. Materials without a qualifying property are absent.
pub async fn material_volumes<B: StorageBackend>(
    backend: &B,
    tx: &B::Tx,
    building_id: Option<&str>,
) -> Result<Vec<MaterialVolume>> {
    let building_id = building_id.map(Value::from);
    let mut totals = VolumeTotals::default();

    for material in backend.nodes_by_label(tx, schema::MATERIAL).await? {
        let quantities = backend
            .neighbors(
                tx,
                material.id,
                Direction::Outgoing,
                &[schema::HAS_QUANTITATIVE_PROPERTY],
                Some(schema::QUANTITATIVE_PROPERTY),
            )
            .await?;

        for q in quantities {
            if q.get(TYPE).and_then(Value::as_str) != Some(VOLUME_TYPE) {
                continue;
            }
            if let Some(wanted) = &building_id {
                if q.get(schema::BUILDING_ID) != Some(wanted) {
                    continue;
                }
            }
            let Some(volume) = q.get(VALUE_M3) else { continue };
            if !volume.is_numeric() {
                warn!(node = %q.id, value = %volume, "ignoring non-numeric value_m3");
                continue;
            }

            let key = material
                .get(schema::NAME)
                .or_else(|| q.get(MATERIAL_ID))
                .and_then(Value::as_label);
            totals.add(key, volume);
        }
    }

    let totals = totals.into_sorted();
    debug!(building_id = ?building_id, materials = totals.len(), "summed material volumes");
    Ok(totals)
}

/// Running sums keyed by material display name, in first-seen order.
#[derive(Default)]
struct VolumeTotals {
    rows: Vec<MaterialVolume>,
    index: HashMap<Option<String>, usize>,
}

impl VolumeTotals {
    fn add(&mut self, material: Option<String>, volume: &Value) {
        match self.index.get(&material) {
            Some(&i) => {
                let entry = &mut self.rows[i];
                if let Some(sum) = entry.volume_m3.add_numeric(volume) {
                    entry.volume_m3 = sum;
                }
            }
            None => {
                self.index.insert(material.clone(), self.rows.len());
                self.rows.push(MaterialVolume { material, volume_m3: volume.clone() });
            }
        }
    }

    fn into_sorted(mut self) -> Vec<MaterialVolume> {
        sort_descending(&mut self.rows);
        self.rows
    }
}

/// Descending by volume; equal volumes by material name, unnamed last.
pub fn sort_descending(totals: &mut [MaterialVolume]) {
    totals.sort_by(|a, b| {
        b.volume_m3
            .cypher_cmp(&a.volume_m3)
            .unwrap_or(Ordering::Equal)
            .then_with(|| match (&a.material, &b.material) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
}
