use std::collections::{BTreeSet, HashMap};

use crate::labels::{NodeLabel, RelationshipLabel, LABEL_PAIRS};
use crate::triplet::Triplet;

/// The closed vocabulary used to constrain and validate extraction output.
///
/// Built once at startup and read-only afterwards. `validate` is the gate
/// between model output and the accumulated graph: records that name a
/// relation or label outside these sets are rejected, never coerced.
pub struct SchemaRegistry {
    node_labels: BTreeSet<&'static str>,
    relationship_types: BTreeSet<&'static str>,
    label_pairs: HashMap<&'static str, (NodeLabel, NodeLabel)>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        let node_labels = NodeLabel::ALL.iter().map(|l| l.as_str()).collect();
        let relationship_types = RelationshipLabel::ALL.iter().map(|r| r.as_str()).collect();

        // Later entries win for relationship types listed with more than one
        // allowed pair; the loader needs a single canonical pair per type.
        let mut label_pairs = HashMap::new();
        for (head, relation, tail) in LABEL_PAIRS {
            label_pairs.insert(relation.as_str(), (*head, *tail));
        }

        Self {
            node_labels,
            relationship_types,
            label_pairs,
        }
    }

    pub fn is_valid_label(&self, label: &str) -> bool {
        self.node_labels.contains(label)
    }

    pub fn is_valid_relation(&self, relation: &str) -> bool {
        self.relationship_types.contains(relation)
    }

    /// The canonical (head label, tail label) pair for a relationship type.
    pub fn label_pair(&self, relation: &str) -> Option<(NodeLabel, NodeLabel)> {
        self.label_pairs.get(relation).copied()
    }

    /// Accept or reject one extracted record.
    ///
    /// The relation must be in the registry; label annotations, when present,
    /// must also be in the registry.
    pub fn validate(&self, triplet: &Triplet) -> bool {
        if !self.is_valid_relation(&triplet.relation) {
            return false;
        }
        for label in [&triplet.head_label, &triplet.tail_label].into_iter().flatten() {
            if !self.is_valid_label(label) {
                return false;
            }
        }
        true
    }

    pub fn node_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.node_labels.iter().copied()
    }

    pub fn relationship_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.relationship_types.iter().copied()
    }

    /// The schema-constraint block embedded verbatim in every extraction
    /// prompt. The wording addresses the model as a Farsi historian and pins
    /// the exact JSON shape expected back.
    pub fn render_instructions(&self) -> String {
        let node_labels = self
            .node_labels()
            .map(|l| format!("`{l}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let relationship_types = self
            .relationship_types()
            .map(|r| format!("`{r}`"))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"شما یک مورخ و تحلیلگر داده متخصص هستید. وظیفه شما خواندن متن تاریخی فارسی زیر و استخراج دقیق موجودیت‌ها و روابط بین آنها بر اساس یک اسکیمای مشخص است.

**اسکیما (Schema):**
شما باید فقط و فقط از برچسب‌های موجودیت (Node Labels) و انواع روابط (Relationship Types) زیر استفاده کنید:

1.  **برچسب‌های موجودیت مجاز:**
    {node_labels}

2.  **انواع روابط مجاز:**
    {relationship_types}

**دستورالعمل خروجی:**
- خروجی شما باید **فقط** یک آبجکت JSON معتبر باشد.
- این آبجکت JSON باید تنها یک کلید به نام `graph` داشته باشد.
- مقدار کلید `graph` باید یک لیست (Array) از سه‌تایی‌ها (triplets) باشد.
- هر سه‌تایی در لیست باید یک آبجکت با سه کلید باشد: `head`, `relation`, `tail`.
- `head` و `tail` نام کامل موجودیت‌های استخراج شده هستند.
- `relation` باید دقیقاً یکی از انواع روابط مجاز باشد.

**مثال برای خروجی JSON:**
{{
  "graph": [
    {{
      "head": "کوروش بزرگ",
      "relation": "حکومت_کرد_در",
      "tail": "ایران"
    }},
    {{
      "head": "داریوش بزرگ",
      "relation": "جانشین_شد",
      "tail": "کمبوجیه دوم"
    }}
  ]
}}

قوانین مهم:
هرگز موجودیت یا رابطه‌ای را که در اسکیمای بالا تعریف نشده است، استخراج نکنید.
اگر هیچ رابطه معتبری در متن پیدا نکردید، یک لیست خالی برای کلید graph برگردانید: {{"graph": []}}.
نام کامل و دقیق موجودیت‌ها را همانطور که در متن آمده است استخراج کنید.
به متن ورودی که در ادامه می‌آید به دقت توجه کنید و استخراج را فقط بر اساس آن انجام دهید."#
        )
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
