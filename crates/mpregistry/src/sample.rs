//! Sample data for demonstrations.
//!
//! Generates a parliament-shaped roster: one prime minister, a fixed cabinet
//! and chair, and general members filling the rest, sorted by position.
//!
//! Ministry is left empty for positions that have none (prime minister,
//! speaker, deputy speaker, general members) even though the form requires
//! it. Generated records are fixtures and do not go through validation.

use rand::Rng;

use crate::record::Prefix;

/// Default roster size.
pub const DEFAULT_COUNT: usize = 500;

/// Priority given to positions not in [`POSITION_PRIORITY`].
pub const UNRANKED_PRIORITY: u32 = 99;

/// Position title for the prime minister.
pub const PRIME_MINISTER: &str = "นายกรัฐมนตรี";
/// Position title for a deputy prime minister.
pub const DEPUTY_PRIME_MINISTER: &str = "รองนายกรัฐมนตรี";
/// Position title for the speaker of the house.
pub const SPEAKER: &str = "ประธานสภาฯ";
/// Position title for the deputy speaker.
pub const DEPUTY_SPEAKER: &str = "รองประธานสภาฯ";
/// Position title for a minister.
pub const MINISTER: &str = "รัฐมนตรี";
/// Position title for a deputy minister.
pub const DEPUTY_MINISTER: &str = "รัฐมนตรีช่วย";
/// Position title for a general member.
pub const MEMBER: &str = "สมาชิกสภาฯ";

/// Sort rank per position; lower sorts first.
pub const POSITION_PRIORITY: &[(&str, u32)] = &[
    (PRIME_MINISTER, 1),
    (DEPUTY_PRIME_MINISTER, 2),
    (SPEAKER, 3),
    (DEPUTY_SPEAKER, 4),
    (MINISTER, 5),
    (DEPUTY_MINISTER, 6),
    (MEMBER, 7),
];

const DEPUTY_PRIME_MINISTERS: usize = 6;
const MINISTERS: usize = 20;
const DEPUTY_MINISTERS: usize = 11;

const FIRST_NAMES: &[&str] = &[
    "สมชาย", "สมศรี", "วิชัย", "ปวีณา", "อาทิตย์", "จันทร์เพ็ญ", "ธนาธร", "สุดารัตน์", "ประยุทธ์",
    "อภิสิทธิ์", "ยิ่งลักษณ์", "ชวน",
];

const LAST_NAMES: &[&str] = &[
    "ไทยดี", "สุขใจ", "สมบูรณ์", "ประเสริฐ", "รุ่งเรือง", "ทรงชัย", "จึงรุ่งเรืองกิจ", "เกยุราพันธุ์",
    "จันทร์โอชา", "เวชชาชีวะ", "ชินวัตร", "หลีกภัย",
];

const PARTIES: &[&str] = &[
    "พรรคประชาธิปัตย์",
    "พรรคเพื่อไทย",
    "พรรคก้าวไกล",
    "พรรคชาติไทยพัฒนา",
    "พรรครวมไทยสร้างชาติ",
    "พรรคพลังประชารัฐ",
    "พรรคภูมิใจไทย",
];

const MINISTRIES: &[&str] = &[
    "กระทรวงการคลัง",
    "กระทรวงศึกษาธิการ",
    "กระทรวงสาธารณสุข",
    "กระทรวงมหาดไทย",
    "กระทรวงกลาโหม",
    "กระทรวงยุติธรรม",
    "กระทรวงการต่างประเทศ",
];

const PARLIAMENT_HISTORY: &str = "ประสบการณ์ทำงานหลายปีในรัฐสภา";
const PARLIAMENT_WORKS: &str = "ผลงานเด่นในสภา";

/// A generated member before it is given an identity and photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleMember {
    /// Honorific title.
    pub prefix: Prefix,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work history.
    pub work_history: String,
    /// Past works.
    pub past_works: String,
    /// Position.
    pub ministerial_position: String,
    /// Ministry, possibly empty.
    pub ministry: String,
    /// Party.
    pub political_party: String,
}

/// Sort rank of a position.
#[must_use]
pub fn position_priority(position: &str) -> u32 {
    POSITION_PRIORITY
        .iter()
        .find(|(name, _)| *name == position)
        .map_or(UNRANKED_PRIORITY, |(_, rank)| *rank)
}

/// Number of records the fixed hierarchy contributes.
#[must_use]
pub const fn hierarchy_size() -> usize {
    1 + DEPUTY_PRIME_MINISTERS + 2 + MINISTERS + DEPUTY_MINISTERS
}

/// Generate a roster of `count` members sorted by position.
///
/// Counts below [`hierarchy_size`] still produce the whole hierarchy.
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<SampleMember> {
    let mut members = Vec::with_capacity(count.max(hierarchy_size()));

    members.push(SampleMember {
        prefix: Prefix::Mr,
        first_name: "อาทิตย์".to_string(),
        last_name: "รุ่งเรือง".to_string(),
        work_history: PARLIAMENT_HISTORY.to_string(),
        past_works: PARLIAMENT_WORKS.to_string(),
        ministerial_position: PRIME_MINISTER.to_string(),
        ministry: String::new(),
        political_party: pick(PARTIES, rng).to_string(),
    });

    for _ in 0..DEPUTY_PRIME_MINISTERS {
        members.push(random_member(rng, DEPUTY_PRIME_MINISTER, true));
    }

    let mut speaker = random_member(rng, SPEAKER, false);
    speaker.work_history = "ผู้ทรงคุณวุฒิ".to_string();
    speaker.past_works = "ประธานการประชุมสภา".to_string();
    members.push(speaker);

    let mut deputy_speaker = random_member(rng, DEPUTY_SPEAKER, false);
    deputy_speaker.work_history = "ประสบการณ์ในกรรมาธิการ".to_string();
    deputy_speaker.past_works = "รองประธานการประชุมสภา".to_string();
    members.push(deputy_speaker);

    for _ in 0..MINISTERS {
        members.push(random_member(rng, MINISTER, true));
    }
    for _ in 0..DEPUTY_MINISTERS {
        members.push(random_member(rng, DEPUTY_MINISTER, true));
    }

    let remaining = count.saturating_sub(members.len());
    for _ in 0..remaining {
        members.push(random_member(rng, MEMBER, false));
    }

    sort_by_position(&mut members);
    members
}

/// Stable sort by position priority; unranked positions go last.
pub fn sort_by_position(members: &mut [SampleMember]) {
    members.sort_by_key(|member| position_priority(&member.ministerial_position));
}

fn random_member<R: Rng + ?Sized>(
    rng: &mut R,
    position: &str,
    has_ministry: bool,
) -> SampleMember {
    SampleMember {
        prefix: Prefix::ALL[rng.random_range(0..Prefix::ALL.len())],
        first_name: pick(FIRST_NAMES, rng).to_string(),
        last_name: pick(LAST_NAMES, rng).to_string(),
        work_history: PARLIAMENT_HISTORY.to_string(),
        past_works: PARLIAMENT_WORKS.to_string(),
        ministerial_position: position.to_string(),
        ministry: if has_ministry {
            pick(MINISTRIES, rng).to_string()
        } else {
            String::new()
        },
        political_party: pick(PARTIES, rng).to_string(),
    }
}

fn pick<'a, R: Rng + ?Sized>(vocabulary: &[&'a str], rng: &mut R) -> &'a str {
    vocabulary[rng.random_range(0..vocabulary.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_generate_default_count() {
        let members = generate(DEFAULT_COUNT, &mut rng());
        assert_eq!(members.len(), DEFAULT_COUNT);
    }

    #[test]
    fn test_prime_minister_first() {
        let members = generate(100, &mut rng());
        assert_eq!(members[0].ministerial_position, PRIME_MINISTER);
        assert_eq!(members[0].first_name, "อาทิตย์");
        let heads = members
            .iter()
            .filter(|m| m.ministerial_position == PRIME_MINISTER)
            .count();
        assert_eq!(heads, 1);
    }

    #[test]
    fn test_sorted_by_priority() {
        let members = generate(120, &mut rng());
        let ranks: Vec<u32> = members
            .iter()
            .map(|m| position_priority(&m.ministerial_position))
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_hierarchy_counts() {
        let members = generate(100, &mut rng());
        let count = |position: &str| {
            members
                .iter()
                .filter(|m| m.ministerial_position == position)
                .count()
        };
        assert_eq!(count(DEPUTY_PRIME_MINISTER), 6);
        assert_eq!(count(SPEAKER), 1);
        assert_eq!(count(DEPUTY_SPEAKER), 1);
        assert_eq!(count(MINISTER), 20);
        assert_eq!(count(DEPUTY_MINISTER), 11);
        assert_eq!(count(MEMBER), 100 - hierarchy_size());
    }

    #[test]
    fn test_small_count_yields_hierarchy() {
        let members = generate(5, &mut rng());
        assert_eq!(members.len(), hierarchy_size());
        assert_eq!(hierarchy_size(), 40);
    }

    #[test]
    fn test_ministry_only_for_cabinet() {
        for member in generate(80, &mut rng()) {
            let cabinet = [DEPUTY_PRIME_MINISTER, MINISTER, DEPUTY_MINISTER]
                .contains(&member.ministerial_position.as_str());
            assert_eq!(!member.ministry.is_empty(), cabinet, "{member:?}");
        }
    }

    #[test]
    fn test_same_seed_same_roster() {
        assert_eq!(generate(60, &mut rng()), generate(60, &mut rng()));
    }

    #[test]
    fn test_unranked_positions_sort_last_stably() {
        let mut members = generate(40, &mut rng());
        members[0].ministerial_position = "ที่ปรึกษา".to_string();
        members[0].first_name = "first".to_string();
        members[1].ministerial_position = "ที่ปรึกษา".to_string();
        members[1].first_name = "second".to_string();

        sort_by_position(&mut members);

        let n = members.len();
        assert_eq!(members[n - 2].first_name, "first");
        assert_eq!(members[n - 1].first_name, "second");
        assert_eq!(position_priority("ที่ปรึกษา"), UNRANKED_PRIORITY);
    }
}
