use once_cell::sync::Lazy;

use crate::models::domain::{Question, Quiz};

struct BuiltinQuestion {
    text: &'static str,
    options: &'static [&'static str],
    correct_answer: u32,
    explanation: &'static str,
}

struct BuiltinQuiz {
    id: &'static str,
    title: &'static str,
    questions: &'static [BuiltinQuestion],
}

const BUILTIN_QUIZZES: &[BuiltinQuiz] = &[
    BuiltinQuiz {
        id: "1",
        title: "Algebra Basics Quiz",
        questions: &[
            BuiltinQuestion {
                text: "What is the solution to 2x + 3 = 7?",
                options: &["2", "3", "4", "5"],
                correct_answer: 0,
                explanation: "Subtract 3 from both sides to get 2x = 4, then divide by 2.",
            },
            BuiltinQuestion {
                text: "Solve for x: x - 2 = 5",
                options: &["3", "5", "7", "9"],
                correct_answer: 2,
                explanation: "Add 2 to both sides: x = 7.",
            },
            BuiltinQuestion {
                text: "What is the value of x in the equation 2x = 12?",
                options: &["4", "6", "8", "10"],
                correct_answer: 1,
                explanation: "Divide both sides by 2: x = 6.",
            },
            BuiltinQuestion {
                text: "Which line passes through the points (2,3) and (4,5)?",
                options: &["y = x + 1", "y = x - 1", "y = 2x - 1", "y = 2x + 1"],
                correct_answer: 0,
                explanation: "The slope is (5 - 3) / (4 - 2) = 1 and the intercept is 1.",
            },
        ],
    },
    BuiltinQuiz {
        id: "2",
        title: "Chemistry Fundamentals Quiz",
        questions: &[
            BuiltinQuestion {
                text: "What is the chemical symbol for gold?",
                options: &["Go", "Gd", "Au", "Ag"],
                correct_answer: 2,
                explanation: "Au comes from the Latin word aurum.",
            },
            BuiltinQuestion {
                text: "What is the pH of pure water at 25°C?",
                options: &["5", "7", "9", "14"],
                correct_answer: 1,
                explanation: "Pure water is neutral.",
            },
            BuiltinQuestion {
                text: "Which particle carries a negative charge?",
                options: &["Proton", "Neutron", "Electron"],
                correct_answer: 2,
                explanation: "Electrons are negatively charged.",
            },
            BuiltinQuestion {
                text: "What is the most abundant gas in Earth's atmosphere?",
                options: &["Oxygen", "Nitrogen", "Carbon dioxide", "Argon"],
                correct_answer: 1,
                explanation: "Nitrogen makes up about 78% of the atmosphere.",
            },
        ],
    },
    BuiltinQuiz {
        id: "3",
        title: "World Wars History Quiz",
        questions: &[
            BuiltinQuestion {
                text: "In which year did World War I begin?",
                options: &["1912", "1914", "1916", "1918"],
                correct_answer: 1,
                explanation: "The war began in July 1914.",
            },
            BuiltinQuestion {
                text: "Which event is usually taken as the start of World War II in Europe?",
                options: &[
                    "The invasion of Poland",
                    "The attack on Pearl Harbor",
                    "The annexation of Austria",
                ],
                correct_answer: 0,
                explanation: "Germany invaded Poland on 1 September 1939.",
            },
            BuiltinQuestion {
                text: "Which treaty formally ended World War I with Germany?",
                options: &["Treaty of Paris", "Treaty of Versailles", "Treaty of Ghent"],
                correct_answer: 1,
                explanation: "The Treaty of Versailles was signed in 1919.",
            },
        ],
    },
    BuiltinQuiz {
        id: "4",
        title: "Geography & Capitals Quiz",
        questions: &[
            BuiltinQuestion {
                text: "What is the capital of Australia?",
                options: &["Sydney", "Melbourne", "Canberra", "Perth"],
                correct_answer: 2,
                explanation: "Canberra was purpose-built as the capital.",
            },
            BuiltinQuestion {
                text: "Which river is the longest in South America?",
                options: &["Amazon", "Paraná", "Orinoco"],
                correct_answer: 0,
                explanation: "The Amazon is the longest river on the continent.",
            },
            BuiltinQuestion {
                text: "What is the capital of Canada?",
                options: &["Toronto", "Ottawa", "Vancouver", "Montreal"],
                correct_answer: 1,
                explanation: "Ottawa is the federal capital.",
            },
        ],
    },
];

static CATALOG: Lazy<Vec<Quiz>> = Lazy::new(|| BUILTIN_QUIZZES.iter().map(to_quiz).collect());

fn to_quiz(builtin: &BuiltinQuiz) -> Quiz {
    let questions = builtin
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| Question {
            id: (i + 1).to_string(),
            text: q.text.to_string(),
            options: q.options.iter().map(|o| o.to_string()).collect(),
            correct_answer: q.correct_answer,
            explanation: Some(q.explanation.to_string()),
        })
        .collect();

    Quiz {
        id: builtin.id.to_string(),
        title: builtin.title.to_string(),
        questions,
        time_limit: None,
        created_at: None,
    }
}

/// Read-only sample quizzes, always listed before stored ones.
pub fn builtin_quizzes() -> &'static [Quiz] {
    &CATALOG
}

pub fn find_builtin(id: &str) -> Option<&'static Quiz> {
    CATALOG.iter().find(|q| q.id == id)
}

pub fn is_builtin(id: &str) -> bool {
    find_builtin(id).is_some()
}
