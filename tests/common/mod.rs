//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;
use wordnet_similarity::oracle::WordnetOracle;

const LICENSE: &str = concat!(
    "  1 This software and database is being provided to you, the LICENSEE, by\n",
    "  2 Princeton University under the following license.\n",
);

/// entity > organism > animal > {dog > puppy, cat}; organism > plant > tree;
/// entity > artifact > car. `ghost` is indexed but has no synset.
const DATA_NOUN: &str = "\
00001740 03 n 01 entity 0 002 ~ 00004475 n 0000 ~ 00021939 n 0000 | that which is perceived to exist
00004475 03 n 02 organism 0 being 0 001 @ 00001740 n 0000 | a living thing
00015388 05 n 02 animal 0 beast 0 002 @ 00004475 n 0000 ~ 02084071 n 0000 | a living organism that moves
02084071 05 n 02 dog 0 domestic_dog 0 002 @ 00015388 n 0000 ~ 01322604 n 0000 | a member of the genus Canis
01322604 05 n 01 puppy 0 001 @ 02084071 n 0000 | a young dog
02121620 05 n 01 cat 0 001 @ 00015388 n 0000 | a feline mammal
00017222 03 n 01 plant 0 001 @ 00004475 n 0000 | a living organism lacking locomotion
13104059 20 n 01 tree 0 001 @ 00017222 n 0000 | a tall perennial woody plant
00021939 03 n 01 artifact 0 001 @ 00001740 n 0000 | a man-made object
02958343 06 n 02 car 0 auto 0 001 @ 00021939 n 0000 | a motor vehicle with four wheels
";

const DATA_VERB: &str = "\
01926311 38 v 01 run 0 001 @ 01835496 v 0000 01 + 01 00 | move fast by using the legs
";

const DATA_ADJ: &str = "\
01382086 00 a 01 big 0 001 & 01383582 a 0000 | above average in size
";

const DATA_ADV: &str = "\
00085811 02 r 01 quickly 0 000 | with rapid movements
";

const INDEX_NOUN: &str = "\
animal n 1 2 @ ~ 1 0 00015388
artifact n 1 1 @ 1 0 00021939
auto n 1 1 @ 1 0 02958343
car n 1 1 @ 1 0 02958343
cat n 1 1 @ 1 0 02121620
creature n 2 1 @ 2 0 00015388 00004475
dog n 1 2 @ ~ 1 1 02084071
domestic_dog n 1 1 @ 1 0 02084071
entity n 1 1 ~ 1 0 00001740
ghost n 1 0 1 0 09999999
organism n 1 1 @ 1 0 00004475
plant n 1 1 @ 1 0 00017222
puppy n 1 1 @ 1 0 01322604
tree n 1 1 @ 1 0 13104059
";

/// Number of taxonomy nodes in the fixture, virtual root included.
pub const NODE_COUNT: usize = 14;

/// Temporary WordNet dictionary used in integration tests.
pub struct TestWordnet {
    dir: TempDir,
}

impl TestWordnet {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create WordNet fixture directory.");
        let files = [
            ("data.noun", DATA_NOUN),
            ("data.verb", DATA_VERB),
            ("data.adj", DATA_ADJ),
            ("data.adv", DATA_ADV),
            ("index.noun", INDEX_NOUN),
        ];
        for (name, body) in files {
            std::fs::write(dir.path().join(name), format!("{LICENSE}{body}"))
                .expect("Failed to write WordNet fixture file.");
        }
        TestWordnet { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.dir.path().join(name)).expect("Failed to remove fixture file.");
    }

    pub fn oracle(&self) -> WordnetOracle {
        WordnetOracle::load(self.path()).expect("Failed to load WordNet fixture.")
    }
}

/// Seco IC of a fixture node with `descendants` hyponyms.
pub fn information_content(descendants: usize) -> f64 {
    1.0 - ((descendants + 1) as f64).ln() / (NODE_COUNT as f64).ln()
}

/// Lin similarity given the hyponym counts of both nodes and their MICA.
pub fn lin(left: usize, right: usize, mica: usize) -> f64 {
    2.0 * information_content(mica) / (information_content(left) + information_content(right))
}
