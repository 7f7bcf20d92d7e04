//! The 100 civics questions of the 2008 naturalization test.

/// `(id, question, answer, section)`
pub(crate) const CIVICS_2008: &[(u32, &str, &str, &str)] = &[
    (
        1,
        "What is the supreme law of the land?",
        "The Constitution",
        "Principles",
    ),
    (
        2,
        "What does the Constitution do?",
        "Sets up the government; Defines the government; Protects basic rights of Americans",
        "Principles",
    ),
    (
        3,
        "The idea of self-government is in the first three words of the Constitution. What are these words?",
        "We the People",
        "Principles",
    ),
    (
        4,
        "What is an amendment?",
        "A change (to the Constitution); An addition (to the Constitution)",
        "Principles",
    ),
    (
        5,
        "What do we call the first ten amendments to the Constitution?",
        "The Bill of Rights",
        "Principles",
    ),
    (
        6,
        "What is one right or freedom from the First Amendment?",
        "Speech; Religion; Assembly; Press; Petition the government",
        "Principles",
    ),
    (
        7,
        "How many amendments does the Constitution have?",
        "Twenty-seven (27)",
        "Principles",
    ),
    (
        8,
        "What did the Declaration of Independence do?",
        "Announced our independence (from Great Britain); Declared our independence (from Great Britain); Said that the United States is free (from Great Britain)",
        "Principles",
    ),
    (
        9,
        "What are two rights in the Declaration of Independence?",
        "Life; Liberty; Pursuit of happiness",
        "Principles",
    ),
    (
        10,
        "What is freedom of religion?",
        "You can practice any religion, or not practice a religion",
        "Principles",
    ),
    (
        11,
        "What is the economic system in the United States?",
        "Capitalist economy; Market economy",
        "Principles",
    ),
    (
        12,
        "What is the 'rule of law'?",
        "Everyone must follow the law; Leaders must obey the law; Government must obey the law; No one is above the law",
        "Principles",
    ),
    (
        13,
        "Name one branch or part of the government.",
        "Congress; Legislative; President; Executive; The courts; Judicial",
        "System of Gov",
    ),
    (
        14,
        "What stops one branch of government from becoming too powerful?",
        "Checks and balances; Separation of powers",
        "System of Gov",
    ),
    (
        15,
        "Who is in charge of the executive branch?",
        "The President",
        "System of Gov",
    ),
    (
        16,
        "Who makes federal laws?",
        "Congress; Senate and House (of Representatives); (U.S. or national) legislature",
        "System of Gov",
    ),
    (
        17,
        "What are the two parts of the U.S. Congress?",
        "The Senate and House (of Representatives)",
        "System of Gov",
    ),
    (
        18,
        "How many U.S. Senators are there?",
        "One hundred (100)",
        "System of Gov",
    ),
    (
        19,
        "We elect a U.S. Senator for how many years?",
        "Six (6)",
        "System of Gov",
    ),
    (
        20,
        "Who is one of your state's U.S. Senators now?",
        "Answers will vary by state",
        "System of Gov",
    ),
    (
        21,
        "The House of Representatives has how many voting members?",
        "Four hundred thirty-five (435)",
        "System of Gov",
    ),
    (
        22,
        "We elect a U.S. Representative for how many years?",
        "Two (2)",
        "System of Gov",
    ),
    (
        23,
        "Name your U.S. Representative.",
        "Answers will vary by district",
        "System of Gov",
    ),
    (
        24,
        "Who does a U.S. Senator represent?",
        "All people of the state",
        "System of Gov",
    ),
    (
        25,
        "Why do some states have more Representatives than other states?",
        "(Because of) the state's population; (Because) they have more people; (Because) some states have more people",
        "System of Gov",
    ),
    (
        26,
        "We elect a President for how many years?",
        "Four (4)",
        "System of Gov",
    ),
    (
        27,
        "In what month do we vote for President?",
        "November",
        "System of Gov",
    ),
    (
        28,
        "What is the name of the President of the United States now?",
        "Answers will vary",
        "System of Gov",
    ),
    (
        29,
        "What is the name of the Vice President of the United States now?",
        "Answers will vary",
        "System of Gov",
    ),
    (
        30,
        "If the President can no longer serve, who becomes President?",
        "The Vice President",
        "System of Gov",
    ),
    (
        31,
        "If both the President and the Vice President can no longer serve, who becomes President?",
        "The Speaker of the House",
        "System of Gov",
    ),
    (
        32,
        "Who is the Commander in Chief of the military?",
        "The President",
        "System of Gov",
    ),
    (
        33,
        "Who signs bills to become laws?",
        "The President",
        "System of Gov",
    ),
    (
        34,
        "Who vetoes bills?",
        "The President",
        "System of Gov",
    ),
    (
        35,
        "What does the President's Cabinet do?",
        "Advises the President",
        "System of Gov",
    ),
    (
        36,
        "What are two Cabinet-level positions?",
        "Secretary of Agriculture; Secretary of Commerce; Secretary of Defense; Secretary of Education; Secretary of Energy; Secretary of Health and Human Services; Secretary of Homeland Security; Secretary of Housing and Urban Development; Secretary of the Interior; Secretary of Labor; Secretary of State; Secretary of Transportation; Secretary of the Treasury; Secretary of Veterans Affairs; Attorney General; Vice President",
        "System of Gov",
    ),
    (
        37,
        "What does the judicial branch do?",
        "Reviews laws; Explains laws; Resolves disputes (disagreements); Decides if a law goes against the Constitution",
        "System of Gov",
    ),
    (
        38,
        "What is the highest court in the United States?",
        "The Supreme Court",
        "System of Gov",
    ),
    (
        39,
        "How many justices are on the Supreme Court?",
        "Nine (9)",
        "System of Gov",
    ),
    (
        40,
        "Who is the Chief Justice of the United States now?",
        "Answers will vary",
        "System of Gov",
    ),
    (
        41,
        "Under our Constitution, some powers belong to the federal government. What is one power of the federal government?",
        "To print money; To declare war; To create an army; To make treaties",
        "System of Gov",
    ),
    (
        42,
        "Under our Constitution, some powers belong to the states. What is one power of the states?",
        "Provide schooling and education; Provide protection (police); Provide safety (fire departments); Give a driver's license; Approve zoning and land use",
        "System of Gov",
    ),
    (
        43,
        "Who is the Governor of your state now?",
        "Answers will vary by state",
        "System of Gov",
    ),
    (
        44,
        "What is the capital of your state?",
        "Answers will vary by state",
        "System of Gov",
    ),
    (
        45,
        "What are the two major political parties in the United States?",
        "Democratic and Republican",
        "System of Gov",
    ),
    (
        46,
        "What is the political party of the President now?",
        "Answers will vary",
        "System of Gov",
    ),
    (
        47,
        "What is the name of the Speaker of the House of Representatives now?",
        "Answers will vary",
        "System of Gov",
    ),
    (
        48,
        "There are four amendments to the Constitution about who can vote. Describe one of them.",
        "Citizens eighteen (18) and older (can vote); You don't have to pay (a poll tax) to vote; Any citizen can vote. (Women and men can vote.); A male citizen of any race (can vote)",
        "Rights",
    ),
    (
        49,
        "What is one responsibility that is only for United States citizens?",
        "Serve on a jury; Vote in a federal election",
        "Rights",
    ),
    (
        50,
        "Name one right only for United States citizens.",
        "Vote in a federal election; Run for federal office",
        "Rights",
    ),
    (
        51,
        "What are two rights of everyone living in the United States?",
        "Freedom of expression; Freedom of speech; Freedom of assembly; Freedom to petition the government; Freedom of religion; The right to bear arms",
        "Rights",
    ),
    (
        52,
        "What do we show loyalty to when we say the Pledge of Allegiance?",
        "The United States; The flag",
        "Rights",
    ),
    (
        53,
        "What is one promise you make when you become a United States citizen?",
        "Give up loyalty to other countries; Defend the Constitution and laws of the United States; Obey the laws of the United States; Serve in the U.S. military (if needed); Serve (do important work for) the nation (if needed); Be loyal to the United States",
        "Rights",
    ),
    (
        54,
        "How old do citizens have to be to vote for President?",
        "Eighteen (18) and older",
        "Rights",
    ),
    (
        55,
        "What are two ways that Americans can participate in their democracy?",
        "Vote; Join a political party; Help with a campaign; Join a civic group; Join a community group; Give an elected official your opinion on an issue; Call Senators and Representatives; Publicly support or oppose an issue or policy; Run for office; Write to a newspaper",
        "Rights",
    ),
    (
        56,
        "When is the last day you can send in federal income tax forms?",
        "April 15",
        "Rights",
    ),
    (
        57,
        "When must all men register for the Selective Service?",
        "At age eighteen (18); Between eighteen (18) and twenty-six (26)",
        "Rights",
    ),
    (
        58,
        "What is one reason colonists came to America?",
        "Freedom; Political liberty; Religious freedom; Economic opportunity; Practice their religion; Escape persecution",
        "Colonial",
    ),
    (
        59,
        "Who lived in America before the Europeans arrived?",
        "American Indians; Native Americans",
        "Colonial",
    ),
    (
        60,
        "What group of people was taken to America and sold as slaves?",
        "Africans; People from Africa",
        "Colonial",
    ),
    (
        61,
        "Why did the colonists fight the British?",
        "Because of high taxes (taxation without representation); Because the British army stayed in their houses (boarding, quartering); Because they didn't have self-government",
        "Colonial",
    ),
    (
        62,
        "Who wrote the Declaration of Independence?",
        "(Thomas) Jefferson",
        "Colonial",
    ),
    (
        63,
        "When was the Declaration of Independence adopted?",
        "July 4, 1776",
        "Colonial",
    ),
    (
        64,
        "There were 13 original states. Name three.",
        "New Hampshire; Massachusetts; Rhode Island; Connecticut; New York; New Jersey; Pennsylvania; Delaware; Maryland; Virginia; North Carolina; South Carolina; Georgia",
        "Colonial",
    ),
    (
        65,
        "What happened at the Constitutional Convention?",
        "The Constitution was written; The Founding Fathers wrote the Constitution",
        "Colonial",
    ),
    (
        66,
        "When was the Constitution written?",
        "1787",
        "Colonial",
    ),
    (
        67,
        "The Federalist Papers supported the passage of the U.S. Constitution. Name one of the writers.",
        "(James) Madison; (Alexander) Hamilton; (John) Jay; Publius",
        "Colonial",
    ),
    (
        68,
        "What is one thing Benjamin Franklin is famous for?",
        "U.S. diplomat; Oldest member of the Constitutional Convention; First Postmaster General of the United States; Writer of 'Poor Richard's Almanac'; Started the first free libraries",
        "Colonial",
    ),
    (
        69,
        "Who is the 'Father of Our Country'?",
        "(George) Washington",
        "Colonial",
    ),
    (
        70,
        "Who was the first President?",
        "(George) Washington",
        "Colonial",
    ),
    (
        71,
        "What territory did the United States buy from France in 1803?",
        "The Louisiana Territory; Louisiana",
        "1800s",
    ),
    (
        72,
        "Name one war fought by the United States in the 1800s.",
        "War of 1812; Mexican-American War; Civil War; Spanish-American War",
        "1800s",
    ),
    (
        73,
        "Name the U.S. war between the North and the South.",
        "The Civil War; The War between the States",
        "1800s",
    ),
    (
        74,
        "Name one problem that led to the Civil War.",
        "Slavery; Economic reasons; States' rights",
        "1800s",
    ),
    (
        75,
        "What was one important thing that Abraham Lincoln did?",
        "Freed the slaves (Emancipation Proclamation); Saved (or preserved) the Union; Led the United States during the Civil War",
        "1800s",
    ),
    (
        76,
        "What did the Emancipation Proclamation do?",
        "Freed the slaves; Freed slaves in the Confederacy; Freed slaves in the Confederate states; Freed slaves in most Southern states",
        "1800s",
    ),
    (
        77,
        "What did Susan B. Anthony do?",
        "Fought for women's rights; Fought for civil rights",
        "1800s",
    ),
    (
        78,
        "Name one war fought by the United States in the 1900s.",
        "World War I; World War II; Korean War; Vietnam War; (Persian) Gulf War",
        "1900s",
    ),
    (
        79,
        "Who was President during World War I?",
        "(Woodrow) Wilson",
        "1900s",
    ),
    (
        80,
        "Who was President during the Great Depression and World War II?",
        "(Franklin) Roosevelt",
        "1900s",
    ),
    (
        81,
        "Who did the United States fight in World War II?",
        "Japan, Germany, and Italy",
        "1900s",
    ),
    (
        82,
        "Before he was President, Eisenhower was a general. What war was he in?",
        "World War II",
        "1900s",
    ),
    (
        83,
        "During the Cold War, what was the main concern of the United States?",
        "Communism",
        "1900s",
    ),
    (
        84,
        "What movement tried to end racial discrimination?",
        "Civil rights (movement)",
        "1900s",
    ),
    (
        85,
        "What did Martin Luther King, Jr. do?",
        "Fought for civil rights; Worked for equality for all Americans",
        "1900s",
    ),
    (
        86,
        "What major event happened on September 11, 2001, in the United States?",
        "Terrorists attacked the United States",
        "1900s",
    ),
    (
        87,
        "Name one American Indian tribe in the United States.",
        "Cherokee; Navajo; Sioux; Chippewa; Choctaw; Pueblo; Apache; Iroquois; Creek; Blackfeet; Seminole; Cheyenne; Arawak; Shawnee; Mohegan; Huron; Oneida; Lakota; Crow; Teton; Hopi; Inuit",
        "1900s",
    ),
    (
        88,
        "Name one of the two longest rivers in the United States.",
        "Missouri (River); Mississippi (River)",
        "Geography",
    ),
    (
        89,
        "What ocean is on the West Coast of the United States?",
        "Pacific (Ocean)",
        "Geography",
    ),
    (
        90,
        "What ocean is on the East Coast of the United States?",
        "Atlantic (Ocean)",
        "Geography",
    ),
    (
        91,
        "Name one U.S. territory.",
        "Puerto Rico; U.S. Virgin Islands; American Samoa; Northern Mariana Islands; Guam",
        "Geography",
    ),
    (
        92,
        "Name one state that borders Canada.",
        "Maine; New Hampshire; Vermont; New York; Pennsylvania; Ohio; Michigan; Minnesota; North Dakota; Montana; Idaho; Washington; Alaska",
        "Geography",
    ),
    (
        93,
        "Name one state that borders Mexico.",
        "California; Arizona; New Mexico; Texas",
        "Geography",
    ),
    (
        94,
        "What is the capital of the United States?",
        "Washington, D.C.",
        "Geography",
    ),
    (
        95,
        "Where is the Statue of Liberty?",
        "New York (Harbor); Liberty Island; [Also acceptable: New Jersey, near New York City, on the Hudson (River)]",
        "Geography",
    ),
    (
        96,
        "Why does the flag have 13 stripes?",
        "Because there were 13 original colonies; Because the stripes represent the original colonies",
        "Symbols",
    ),
    (
        97,
        "Why does the flag have 50 stars?",
        "Because there is one star for each state; Because each star represents a state; Because there are 50 states",
        "Symbols",
    ),
    (
        98,
        "What is the name of the national anthem?",
        "The Star-Spangled Banner",
        "Symbols",
    ),
    (
        99,
        "When do we celebrate Independence Day?",
        "July 4",
        "Holidays",
    ),
    (
        100,
        "Name two national U.S. holidays.",
        "New Year's Day; Martin Luther King, Jr. Day; Presidents' Day; Memorial Day; Independence Day; Labor Day; Columbus Day; Veterans Day; Thanksgiving; Christmas",
        "Holidays",
    ),
];
