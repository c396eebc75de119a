//! The closed vocabulary of the knowledge graph.
//!
//! Labels and relationship types carry Farsi string values because they are
//! embedded verbatim in extraction prompts and become Neo4j labels and
//! relationship types. The sets are fixed at compile time; schema curation
//! happens offline.

/// Node (entity) labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeLabel {
    Person,
    Location,
    Event,
    Organization,
    Date,
    Concept,
    LegalCase,
    GovernmentRole,
    ViolentAct,
}

impl NodeLabel {
    pub const ALL: [NodeLabel; 9] = [
        NodeLabel::Person,
        NodeLabel::Location,
        NodeLabel::Event,
        NodeLabel::Organization,
        NodeLabel::Date,
        NodeLabel::Concept,
        NodeLabel::LegalCase,
        NodeLabel::GovernmentRole,
        NodeLabel::ViolentAct,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeLabel::Person => "شخص",
            NodeLabel::Location => "مکان",
            NodeLabel::Event => "رویداد",
            NodeLabel::Organization => "سازمان",
            NodeLabel::Date => "تاریخ",
            NodeLabel::Concept => "مفهوم",
            NodeLabel::LegalCase => "پرونده_قضایی",
            NodeLabel::GovernmentRole => "منصب_دولتی",
            NodeLabel::ViolentAct => "اقدام_خشونت‌آمیز",
        }
    }
}

/// Relationship types between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipLabel {
    // Factual & event
    BornIn,
    DiedIn,
    ParticipatedIn,
    OccurredIn,
    StartedOn,
    EndedOn,
    OccurredOn,
    // Family
    FatherOf,
    MotherOf,
    ChildOf,
    SpouseOf,
    SiblingOf,
    // Interpersonal & violent
    LiedTo,
    Betrayed,
    InformedOn,
    FoughtAgainst,
    PretendedToBe,
    SpokeAbout,
    PerpetratorOf,
    VictimOf,
    // Governmental
    MemberOf,
    HeadOf,
    HeldRole,
    AffiliatedWith,
    Succeeded,
    // Legal
    ProsecutorIn,
    DefendantIn,
    JudgeIn,
    WitnessIn,
    LawyerFor,
    FiledCase,
    ConvictedOf,
    AcquittedIn,
    // Curated additions
    InitiatedDestructionOf,
    AidedDestructionOf,
    Imposed,
    HostileTowards,
    AlliedWith,
    FabricatedCaseAgainst,
    Established,
    Threatened,
    ParticipatedInMassacre,
    Bypassed,
    DismissedDueTo,
    Supported,
    ResponsibleFor,
    PavedWayFor,
    Led,
    Accused,
    LedTo,
    AcquaintedWith,
    CollaboratedWith,
    TrainedBy,
    Appointed,
    Represented,
    Opposed,
    Defended,
    CoveredUp,
}

impl RelationshipLabel {
    pub const ALL: [RelationshipLabel; 58] = [
        RelationshipLabel::BornIn,
        RelationshipLabel::DiedIn,
        RelationshipLabel::ParticipatedIn,
        RelationshipLabel::OccurredIn,
        RelationshipLabel::StartedOn,
        RelationshipLabel::EndedOn,
        RelationshipLabel::OccurredOn,
        RelationshipLabel::FatherOf,
        RelationshipLabel::MotherOf,
        RelationshipLabel::ChildOf,
        RelationshipLabel::SpouseOf,
        RelationshipLabel::SiblingOf,
        RelationshipLabel::LiedTo,
        RelationshipLabel::Betrayed,
        RelationshipLabel::InformedOn,
        RelationshipLabel::FoughtAgainst,
        RelationshipLabel::PretendedToBe,
        RelationshipLabel::SpokeAbout,
        RelationshipLabel::PerpetratorOf,
        RelationshipLabel::VictimOf,
        RelationshipLabel::MemberOf,
        RelationshipLabel::HeadOf,
        RelationshipLabel::HeldRole,
        RelationshipLabel::AffiliatedWith,
        RelationshipLabel::Succeeded,
        RelationshipLabel::ProsecutorIn,
        RelationshipLabel::DefendantIn,
        RelationshipLabel::JudgeIn,
        RelationshipLabel::WitnessIn,
        RelationshipLabel::LawyerFor,
        RelationshipLabel::FiledCase,
        RelationshipLabel::ConvictedOf,
        RelationshipLabel::AcquittedIn,
        RelationshipLabel::InitiatedDestructionOf,
        RelationshipLabel::AidedDestructionOf,
        RelationshipLabel::Imposed,
        RelationshipLabel::HostileTowards,
        RelationshipLabel::AlliedWith,
        RelationshipLabel::FabricatedCaseAgainst,
        RelationshipLabel::Established,
        RelationshipLabel::Threatened,
        RelationshipLabel::ParticipatedInMassacre,
        RelationshipLabel::Bypassed,
        RelationshipLabel::DismissedDueTo,
        RelationshipLabel::Supported,
        RelationshipLabel::ResponsibleFor,
        RelationshipLabel::PavedWayFor,
        RelationshipLabel::Led,
        RelationshipLabel::Accused,
        RelationshipLabel::LedTo,
        RelationshipLabel::AcquaintedWith,
        RelationshipLabel::CollaboratedWith,
        RelationshipLabel::TrainedBy,
        RelationshipLabel::Appointed,
        RelationshipLabel::Represented,
        RelationshipLabel::Opposed,
        RelationshipLabel::Defended,
        RelationshipLabel::CoveredUp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipLabel::BornIn => "متولد_شد_در",
            RelationshipLabel::DiedIn => "درگذشت_در",
            RelationshipLabel::ParticipatedIn => "شرکت_کرد_در",
            RelationshipLabel::OccurredIn => "رخ_داد_در",
            RelationshipLabel::StartedOn => "شروع_شد_در",
            RelationshipLabel::EndedOn => "پایان_یافت_در",
            RelationshipLabel::OccurredOn => "رخ_داد_در_تاریخ",
            RelationshipLabel::FatherOf => "پدر_بود",
            RelationshipLabel::MotherOf => "مادر_بود",
            RelationshipLabel::ChildOf => "فرزند_بود",
            RelationshipLabel::SpouseOf => "همسر_بود",
            RelationshipLabel::SiblingOf => "خواهر_برادر_بود",
            RelationshipLabel::LiedTo => "دروغ_گفت_به",
            RelationshipLabel::Betrayed => "خیانت_کرد_به",
            RelationshipLabel::InformedOn => "خبرچینی_کرد_علیه",
            RelationshipLabel::FoughtAgainst => "جنگید_علیه",
            RelationshipLabel::PretendedToBe => "تظاهر_کرد_به",
            RelationshipLabel::SpokeAbout => "صحبت_کرد_درباره",
            RelationshipLabel::PerpetratorOf => "مرتکب_شد",
            RelationshipLabel::VictimOf => "قربانی_بود",
            RelationshipLabel::MemberOf => "عضو_بود_در",
            RelationshipLabel::HeadOf => "رئیس_بود",
            RelationshipLabel::HeldRole => "منصب_داشت",
            RelationshipLabel::AffiliatedWith => "وابسته_بود_به",
            RelationshipLabel::Succeeded => "جانشین_شد",
            RelationshipLabel::ProsecutorIn => "دادستان_بود_در",
            RelationshipLabel::DefendantIn => "متهم_بود_در",
            RelationshipLabel::JudgeIn => "قاضی_بود_در",
            RelationshipLabel::WitnessIn => "شاهد_بود_در",
            RelationshipLabel::LawyerFor => "وکیل_بود_برای",
            RelationshipLabel::FiledCase => "پرونده_تشکیل_داد",
            RelationshipLabel::ConvictedOf => "محکوم_شد_به",
            RelationshipLabel::AcquittedIn => "تبرئه_شد_در",
            RelationshipLabel::InitiatedDestructionOf => "مبتکر_نابودی",
            RelationshipLabel::AidedDestructionOf => "همراهی_در_نابودی",
            RelationshipLabel::Imposed => "تحمیل_کرد",
            RelationshipLabel::HostileTowards => "ضدیت_داشت_با",
            RelationshipLabel::AlliedWith => "همراهی_کرد_با",
            RelationshipLabel::FabricatedCaseAgainst => "پرونده‌سازی_کرد_برای",
            RelationshipLabel::Established => "راه‌اندازی_کرد",
            RelationshipLabel::Threatened => "تهدید_کرد",
            RelationshipLabel::ParticipatedInMassacre => "مشارکت_در_کشتار",
            RelationshipLabel::Bypassed => "دور_زد",
            RelationshipLabel::DismissedDueTo => "برکنار_شد_به_خاطر",
            RelationshipLabel::Supported => "حمایت_کرد_از",
            RelationshipLabel::ResponsibleFor => "مسئول_بود_در",
            RelationshipLabel::PavedWayFor => "زمینه‌ساز_بود_برای",
            RelationshipLabel::Led => "رهبری_کرد",
            RelationshipLabel::Accused => "متهم_کرد",
            RelationshipLabel::LedTo => "منجر_شد_به",
            RelationshipLabel::AcquaintedWith => "آشنایی_داشت_با",
            RelationshipLabel::CollaboratedWith => "همکاری_کرد_با",
            RelationshipLabel::TrainedBy => "آموزش_دید_از",
            RelationshipLabel::Appointed => "منصوب_کرد",
            RelationshipLabel::Represented => "نماینده_بود_از",
            RelationshipLabel::Opposed => "مخالفت_کرد_با",
            RelationshipLabel::Defended => "دفاع_کرد_از",
            RelationshipLabel::CoveredUp => "سرپوش_گذاشت_بر",
        }
    }
}

/// Which node labels a relationship type is allowed to connect.
///
/// A relationship type that appears more than once keeps its last entry when
/// the registry builds its lookup table; the loader only needs one canonical
/// pair per type.
pub const LABEL_PAIRS: &[(NodeLabel, RelationshipLabel, NodeLabel)] = &[
    // Factual
    (NodeLabel::Person, RelationshipLabel::BornIn, NodeLabel::Location),
    (NodeLabel::Person, RelationshipLabel::DiedIn, NodeLabel::Location),
    (NodeLabel::Person, RelationshipLabel::ParticipatedIn, NodeLabel::Event),
    (NodeLabel::Event, RelationshipLabel::OccurredIn, NodeLabel::Location),
    // Time-based
    (NodeLabel::Event, RelationshipLabel::StartedOn, NodeLabel::Date),
    (NodeLabel::Event, RelationshipLabel::EndedOn, NodeLabel::Date),
    (NodeLabel::Event, RelationshipLabel::OccurredOn, NodeLabel::Date),
    (NodeLabel::LegalCase, RelationshipLabel::StartedOn, NodeLabel::Date),
    (NodeLabel::LegalCase, RelationshipLabel::EndedOn, NodeLabel::Date),
    (NodeLabel::ViolentAct, RelationshipLabel::OccurredOn, NodeLabel::Date),
    // Family
    (NodeLabel::Person, RelationshipLabel::FatherOf, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::MotherOf, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::ChildOf, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::SpouseOf, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::SiblingOf, NodeLabel::Person),
    // Interpersonal & violent
    (NodeLabel::Person, RelationshipLabel::LiedTo, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::Betrayed, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::InformedOn, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::FoughtAgainst, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::SpokeAbout, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::PerpetratorOf, NodeLabel::ViolentAct),
    (NodeLabel::Person, RelationshipLabel::VictimOf, NodeLabel::ViolentAct),
    (NodeLabel::ViolentAct, RelationshipLabel::OccurredIn, NodeLabel::Location),
    // Governmental
    (NodeLabel::Person, RelationshipLabel::MemberOf, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::HeadOf, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::HeldRole, NodeLabel::GovernmentRole),
    (NodeLabel::Organization, RelationshipLabel::AffiliatedWith, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::Succeeded, NodeLabel::Person),
    // Legal
    (NodeLabel::Person, RelationshipLabel::ProsecutorIn, NodeLabel::LegalCase),
    (NodeLabel::Person, RelationshipLabel::DefendantIn, NodeLabel::LegalCase),
    (NodeLabel::Person, RelationshipLabel::JudgeIn, NodeLabel::LegalCase),
    (NodeLabel::Person, RelationshipLabel::WitnessIn, NodeLabel::LegalCase),
    (NodeLabel::Person, RelationshipLabel::LawyerFor, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::FiledCase, NodeLabel::LegalCase),
    (NodeLabel::Organization, RelationshipLabel::FiledCase, NodeLabel::LegalCase),
    (NodeLabel::Person, RelationshipLabel::ConvictedOf, NodeLabel::Concept),
    (NodeLabel::Person, RelationshipLabel::AcquittedIn, NodeLabel::LegalCase),
    // Curated additions
    (NodeLabel::Person, RelationshipLabel::InitiatedDestructionOf, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::AidedDestructionOf, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::Imposed, NodeLabel::Concept),
    (NodeLabel::Person, RelationshipLabel::HostileTowards, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::HostileTowards, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::AlliedWith, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::AlliedWith, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::FabricatedCaseAgainst, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::Established, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::Threatened, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::ParticipatedInMassacre, NodeLabel::Event),
    (NodeLabel::Person, RelationshipLabel::Bypassed, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::DismissedDueTo, NodeLabel::Concept),
    (NodeLabel::Person, RelationshipLabel::Supported, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::Supported, NodeLabel::Concept),
    (NodeLabel::Person, RelationshipLabel::ResponsibleFor, NodeLabel::Event),
    (NodeLabel::Event, RelationshipLabel::PavedWayFor, NodeLabel::Event),
    (NodeLabel::Person, RelationshipLabel::Led, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::Led, NodeLabel::Event),
    (NodeLabel::Person, RelationshipLabel::Accused, NodeLabel::Person),
    (NodeLabel::Organization, RelationshipLabel::Accused, NodeLabel::Person),
    (NodeLabel::Event, RelationshipLabel::LedTo, NodeLabel::Event),
    (NodeLabel::Person, RelationshipLabel::AcquaintedWith, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::CollaboratedWith, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::CollaboratedWith, NodeLabel::Organization),
    (NodeLabel::Person, RelationshipLabel::TrainedBy, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::Appointed, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::Represented, NodeLabel::Location),
    (NodeLabel::Person, RelationshipLabel::Opposed, NodeLabel::Concept),
    (NodeLabel::Person, RelationshipLabel::Opposed, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::Defended, NodeLabel::Person),
    (NodeLabel::Person, RelationshipLabel::Defended, NodeLabel::Concept),
    (NodeLabel::Person, RelationshipLabel::CoveredUp, NodeLabel::Event),
    (NodeLabel::Organization, RelationshipLabel::CoveredUp, NodeLabel::Event),
];
