use serde::{Deserialize, Serialize};

use crate::models::{DetectedObject, ObjectCondition};

/// Change category of a detected object when entry and exit are compared.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Changed,
    Unchanged,
    New,
    Missing,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [Bucket::Changed, Bucket::Unchanged, Bucket::New, Bucket::Missing];
}

/// One bucket entry. `entry` is absent for `New`, `exit` is absent for
/// `Missing`. Both photo URLs are kept so the report can show the two sides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparedObject {
    pub bucket: Bucket,
    pub entry: Option<DetectedObject>,
    pub exit: Option<DetectedObject>,
    pub entry_photo_url: Option<String>,
    pub exit_photo_url: Option<String>,
}

impl ComparedObject {
    fn new(bucket: Bucket, entry: Option<DetectedObject>, exit: Option<DetectedObject>) -> Self {
        let entry_photo_url = entry.as_ref().and_then(|obj| obj.photo_url.clone());
        let exit_photo_url = exit.as_ref().and_then(|obj| obj.photo_url.clone());
        Self {
            bucket,
            entry,
            exit,
            entry_photo_url,
            exit_photo_url,
        }
    }

    /// Display name, taken from whichever side is present.
    pub fn item(&self) -> &str {
        self.exit
            .as_ref()
            .or(self.entry.as_ref())
            .map(|obj| obj.item.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectBuckets {
    pub changed: Vec<ComparedObject>,
    pub unchanged: Vec<ComparedObject>,
    pub new: Vec<ComparedObject>,
    pub missing: Vec<ComparedObject>,
}

impl ObjectBuckets {
    pub fn get(&self, bucket: Bucket) -> &[ComparedObject] {
        match bucket {
            Bucket::Changed => &self.changed,
            Bucket::Unchanged => &self.unchanged,
            Bucket::New => &self.new,
            Bucket::Missing => &self.missing,
        }
    }

    pub(crate) fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<ComparedObject> {
        match bucket {
            Bucket::Changed => &mut self.changed,
            Bucket::Unchanged => &mut self.unchanged,
            Bucket::New => &mut self.new,
            Bucket::Missing => &mut self.missing,
        }
    }

    pub fn total(&self) -> usize {
        self.changed.len() + self.unchanged.len() + self.new.len() + self.missing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Pair a room's entry objects against its exit objects and classify them.
///
/// Greedy and order-sensitive: exit objects are visited in detection order and
/// each takes the first remaining entry object with the same normalized name.
/// An exit object marked `not_found` is skipped without consuming an entry
/// object and without producing a bucket entry.
pub fn match_objects(entry_objects: &[DetectedObject], exit_objects: &[DetectedObject]) -> ObjectBuckets {
    let mut missing_pool: Vec<(String, &DetectedObject)> = entry_objects
        .iter()
        .map(|obj| (obj.normalized_item(), obj))
        .collect();
    let mut paired: Vec<(&DetectedObject, &DetectedObject)> = Vec::new();
    let mut buckets = ObjectBuckets::default();

    for exit_obj in exit_objects {
        if exit_obj.condition == ObjectCondition::NotFound {
            continue;
        }

        let key = exit_obj.normalized_item();
        match missing_pool.iter().position(|(entry_key, _)| *entry_key == key) {
            Some(pos) => {
                let (_, entry_obj) = missing_pool.remove(pos);
                paired.push((entry_obj, exit_obj));
            }
            None => buckets
                .new
                .push(ComparedObject::new(Bucket::New, None, Some(exit_obj.clone()))),
        }
    }

    buckets.missing = missing_pool
        .into_iter()
        .map(|(_, entry_obj)| ComparedObject::new(Bucket::Missing, Some(entry_obj.clone()), None))
        .collect();

    for (entry_obj, exit_obj) in paired {
        let bucket = if entry_obj.condition != exit_obj.condition {
            Bucket::Changed
        } else {
            Bucket::Unchanged
        };
        buckets.get_mut(bucket).push(ComparedObject::new(
            bucket,
            Some(entry_obj.clone()),
            Some(exit_obj.clone()),
        ));
    }

    buckets
}
