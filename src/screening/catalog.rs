use super::domain::{
    AnswerScale, ClassificationBasis, ClassificationScheme, Instrument, RiskBand, ScaleChoice,
    ScalePolarity, ScoreBand, SectionTemplate,
};

/// The fixed set of screening instruments this service administers.
///
/// Each preset is an independent configuration: item sets, section
/// boundaries, scales, and breakpoints genuinely differ between the source
/// questionnaires and are kept separate rather than merged.
#[derive(Debug)]
pub struct ScreeningCatalog {
    instruments: Vec<Instrument>,
}

impl ScreeningCatalog {
    pub fn standard() -> Self {
        Self {
            instruments: vec![caregiver_48(), isaa_40(), early_years_50(), qchat_10()],
        }
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn find(&self, id: &str) -> Option<&Instrument> {
        self.instruments
            .iter()
            .find(|instrument| instrument.id.eq_ignore_ascii_case(id.trim()))
    }
}

fn reversed_frequency_scale() -> AnswerScale {
    AnswerScale::new(vec![
        ScaleChoice {
            label: "Never",
            weight: 3,
        },
        ScaleChoice {
            label: "Rarely",
            weight: 2,
        },
        ScaleChoice {
            label: "Sometimes",
            weight: 1,
        },
        ScaleChoice {
            label: "Often",
            weight: 0,
        },
    ])
}

fn percent_likelihood_scheme() -> ClassificationScheme {
    ClassificationScheme::new(
        ClassificationBasis::Percent,
        vec![
            ScoreBand {
                upper: 40.0,
                band: RiskBand {
                    label: "Low",
                    guidance: "Low likelihood of autistic behavioural traits.",
                },
            },
            ScoreBand {
                upper: 60.0,
                band: RiskBand {
                    label: "Moderate",
                    guidance: "Mild-moderate likelihood. Observation and follow-up recommended.",
                },
            },
        ],
        RiskBand {
            label: "High",
            guidance:
                "Higher likelihood of autistic behavioural traits. Professional assessment recommended.",
        },
    )
}

/// 48-item caregiver observation questionnaire across six behavioural and
/// developmental domains. Items are positively worded, so frequent behavior
/// lowers the score.
fn caregiver_48() -> Instrument {
    Instrument {
        id: "caregiver-48",
        name: "Caregiver Observation Screening (48 items)",
        description: "Pre-diagnostic caregiver questionnaire across six behavioural and developmental domains.",
        sections: vec![
            SectionTemplate {
                key: "social_interaction",
                name: "Social Interaction & Responsiveness",
                questions: vec![
                    "Maintains eye contact while talking",
                    "Responds to their name",
                    "Shows interest in other children",
                    "Participates in group play",
                    "Interacts socially at home",
                    "Interacts socially outside",
                    "Maintains friendships",
                    "Behaves appropriately in groups",
                ],
            },
            SectionTemplate {
                key: "communication",
                name: "Communication & Language",
                questions: vec![
                    "Understands simple instructions",
                    "Expresses emotions appropriately",
                    "Communicates needs",
                    "Uses gestures",
                    "Forms sentences",
                    "Uses language socially",
                    "Initiates conversation",
                    "Communicates with teachers",
                ],
            },
            SectionTemplate {
                key: "behaviour",
                name: "Behaviour & Adaptability",
                questions: vec![
                    "Follows routines easily",
                    "Adapts to change",
                    "Follows classroom rules",
                    "Participates in activities",
                    "Sits calmly when needed",
                    "Displays age-appropriate behaviour",
                    "Reacts normally to change",
                    "Seeks help when needed",
                ],
            },
            SectionTemplate {
                key: "sensory",
                name: "Sensory Response",
                questions: vec![
                    "Reacts normally to noise",
                    "Reacts normally to touch",
                    "Reacts normally to light",
                    "Reacts normally to sensory input",
                    "Tolerates loud sounds",
                    "Tolerates unfamiliar textures",
                    "Stays calm in busy places",
                    "Adjusts to new environments",
                ],
            },
            SectionTemplate {
                key: "cognitive",
                name: "Cognitive & Learning Skills",
                questions: vec![
                    "Performs age-appropriate learning",
                    "Understands others' feelings",
                    "Shows empathy",
                    "Matches patterns",
                    "Copies actions",
                    "Explores environment normally",
                    "Expresses curiosity",
                    "Shows imaginative or pretend play",
                ],
            },
            SectionTemplate {
                key: "motor",
                name: "Motor & Coordination",
                questions: vec![
                    "Shows appropriate motor skills",
                    "Coordinates hand movements",
                    "Uses hand-eye coordination well",
                    "Engages in normal activities",
                    "Laughs or smiles appropriately",
                    "Responds when spoken to",
                    "Uses appropriate language",
                    "Plays normally with toys",
                ],
            },
        ],
        scale: reversed_frequency_scale(),
        polarity: ScalePolarity::FrequencyIndicatesTypical,
        classification: percent_likelihood_scheme(),
    }
}

/// 40-item frequency-scored screening aligned with the ISAA domain layout.
/// Items describe atypical behavior directly, so frequent behavior raises
/// the score; breakpoints compare against the raw total.
fn isaa_40() -> Instrument {
    Instrument {
        id: "isaa-40",
        name: "ISAA Frequency Screening (40 items)",
        description: "Assessment across six ISAA domains on a five-level frequency scale with raw-score breakpoints.",
        sections: vec![
            SectionTemplate {
                key: "social_relationship",
                name: "Social Relationship and Reciprocity",
                questions: vec![
                    "Has poor eye contact",
                    "Lacks social smile",
                    "Remains aloof",
                    "Does not reach out to others",
                    "Unable to relate to people",
                    "Unable to respond to social/environmental cues",
                    "Engages in solitary and repetitive play activities",
                    "Unable to take turns in social interaction",
                    "Does not maintain peer relationships",
                ],
            },
            SectionTemplate {
                key: "emotional_responsiveness",
                name: "Emotional Responsiveness",
                questions: vec![
                    "Shows inappropriate emotional response",
                    "Shows exaggerated emotions",
                    "Engages in self-stimulating emotions",
                    "Lacks fear of danger",
                    "Excited or agitated for no apparent reason",
                ],
            },
            SectionTemplate {
                key: "speech_language",
                name: "Speech-Language and Communication",
                questions: vec![
                    "Acquired speech and lost it",
                    "Has difficulty using non-verbal language or gestures",
                    "Engages in stereotyped and repetitive use of language",
                    "Engages in echolalic speech",
                    "Produces infantile squeals or unusual noises",
                    "Unable to initiate or sustain conversation",
                    "Uses jargon or meaningless words",
                    "Uses pronoun reversals",
                    "Unable to grasp pragmatics of communication",
                ],
            },
            SectionTemplate {
                key: "behaviour_patterns",
                name: "Behaviour Patterns",
                questions: vec![
                    "Engages in stereotyped and repetitive motor mannerisms",
                    "Shows attachment to inanimate objects",
                    "Shows hyperactivity or restlessness",
                    "Exhibits aggressive behavior",
                    "Throws temper tantrums",
                    "Engages in self-injurious behavior",
                    "Insists on sameness",
                ],
            },
            SectionTemplate {
                key: "sensory_aspects",
                name: "Sensory Aspects",
                questions: vec![
                    "Unusually sensitive to sensory stimuli",
                    "Stares into space for long periods of time",
                    "Has difficulty in tracking objects",
                    "Has unusual vision",
                    "Insensitive to pain",
                    "Responds to objects/people unusually by smelling, touching or tasting",
                ],
            },
            SectionTemplate {
                key: "cognitive_component",
                name: "Cognitive Component",
                questions: vec![
                    "Inconsistent attention and concentration",
                    "Shows delay in responding",
                    "Has unusual memory of some kind",
                    "Has savant ability",
                ],
            },
        ],
        scale: AnswerScale::new(vec![
            ScaleChoice {
                label: "Rarely",
                weight: 1,
            },
            ScaleChoice {
                label: "Sometimes",
                weight: 2,
            },
            ScaleChoice {
                label: "Frequently",
                weight: 3,
            },
            ScaleChoice {
                label: "Mostly",
                weight: 4,
            },
            ScaleChoice {
                label: "Always",
                weight: 5,
            },
        ]),
        polarity: ScalePolarity::FrequencyIndicatesRisk,
        classification: ClassificationScheme::new(
            ClassificationBasis::RawTotal,
            vec![
                ScoreBand {
                    upper: 70.0,
                    band: RiskBand {
                        label: "No indication",
                        guidance: "Total falls below the screening cutoff.",
                    },
                },
                ScoreBand {
                    upper: 107.0,
                    band: RiskBand {
                        label: "Mild",
                        guidance: "Low likelihood. Periodic observation suggested.",
                    },
                },
                ScoreBand {
                    upper: 154.0,
                    band: RiskBand {
                        label: "Moderate",
                        guidance: "Moderate indication. Specialist consultation recommended.",
                    },
                },
            ],
            RiskBand {
                label: "Severe",
                guidance: "Strong indication. Professional developmental assessment recommended.",
            },
        ),
    }
}

/// 50-item early-years questionnaire with paged section navigation in the
/// source tooling. Positively worded like caregiver-48, percent breakpoints.
fn early_years_50() -> Instrument {
    Instrument {
        id: "early-years-50",
        name: "Early Years Screening (50 items)",
        description: "Fifty-item early development questionnaire across six domains with percentage breakpoints.",
        sections: vec![
            SectionTemplate {
                key: "social_responsiveness",
                name: "Social Relationship & Responsiveness",
                questions: vec![
                    "Child maintains eye contact while talking",
                    "Child responds to their name",
                    "Child shows interest in other children",
                    "Child participates in group play",
                    "Child understands simple instructions",
                    "Child expresses emotions appropriately",
                    "Child can communicate needs",
                    "Child shows imaginative play",
                    "Child shares interests with others",
                    "Child reacts normally to sensory input",
                ],
            },
            SectionTemplate {
                key: "communication",
                name: "Communication",
                questions: vec![
                    "Child can sit calmly when needed",
                    "Child follows routines easily",
                    "Child adapts to change",
                    "Child reacts normally to noise",
                    "Child reacts normally to touch",
                    "Child reacts normally to light",
                    "Child performs age-appropriate learning",
                    "Child interacts socially",
                    "Child responds when spoken to",
                    "Child laughs and smiles appropriately",
                ],
            },
            SectionTemplate {
                key: "emotional_responsiveness",
                name: "Emotional Responsiveness",
                questions: vec![
                    "Child uses gestures",
                    "Child points to express interest",
                    "Child copies actions",
                    "Child engages in pretend play",
                    "Child shows empathy",
                    "Child understands others' feelings",
                    "Child uses appropriate language",
                    "Child forms sentences",
                    "Child uses language socially",
                    "Child initiates conversation",
                ],
            },
            SectionTemplate {
                key: "cognitive",
                name: "Cognitive Component",
                questions: vec![
                    "Child reacts normally to change",
                    "Child plays normally with toys",
                    "Child engages in normal activities",
                    "Child explores environment normally",
                    "Child expresses curiosity",
                    "Child shows appropriate motor skills",
                ],
            },
            SectionTemplate {
                key: "sensory_motor",
                name: "Sensory & Motor Behaviours",
                questions: vec![
                    "Child coordinates hand movements",
                    "Child uses eye-hand coordination well",
                    "Child imitates actions",
                    "Child matches patterns",
                    "Child interacts socially at home",
                    "Child interacts socially outside",
                ],
            },
            SectionTemplate {
                key: "behaviour_pattern",
                name: "Behaviour Pattern",
                questions: vec![
                    "Child behaves appropriately in groups",
                    "Child maintains friendships",
                    "Child behaves appropriately in school",
                    "Child communicates with teachers",
                    "Child follows classroom rules",
                    "Child participates in activities",
                    "Child displays age-appropriate behaviour",
                    "Child seeks help when needed",
                ],
            },
        ],
        scale: reversed_frequency_scale(),
        polarity: ScalePolarity::FrequencyIndicatesTypical,
        classification: percent_likelihood_scheme(),
    }
}

/// Ten-item binary quick screen. Six or more flagged answers cross the
/// referral cutoff.
fn qchat_10() -> Instrument {
    Instrument {
        id: "qchat-10",
        name: "Quick Screening (10 items)",
        description: "Ten yes/no observation items with a raw cutoff at six flagged answers.",
        sections: vec![SectionTemplate {
            key: "observations",
            name: "Observations",
            questions: vec![
                "Does your child look at you when you call his/her name?",
                "How easy is it for you to get eye contact with your child?",
                "Does your child point to indicate that s/he wants something?",
                "Does your child point to share interest with you?",
                "Does your child pretend?",
                "Does your child follow where you're looking?",
                "Does your child show signs of wanting to comfort others?",
                "Are your child's first words typical?",
                "Does your child use simple gestures?",
                "Does your child stare at nothing with no purpose?",
            ],
        }],
        scale: AnswerScale::new(vec![
            ScaleChoice {
                label: "No",
                weight: 0,
            },
            ScaleChoice {
                label: "Yes",
                weight: 1,
            },
        ]),
        polarity: ScalePolarity::FrequencyIndicatesRisk,
        classification: ClassificationScheme::new(
            ClassificationBasis::RawTotal,
            vec![ScoreBand {
                upper: 6.0,
                band: RiskBand {
                    label: "Low",
                    guidance: "Low risk of ASD traits detected.",
                },
            }],
            RiskBand {
                label: "High",
                guidance: "High risk of ASD traits. Consider professional evaluation.",
            },
        ),
    }
}
