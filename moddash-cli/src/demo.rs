//! Sample data for `--demo`.

use moddash_lib::backend::MemoryBackend;
use moddash_lib::model::EntityFlags;
use moddash_lib::model::InstagramReview;
use moddash_lib::model::ListedEntity;
use moddash_lib::model::Platform;
use moddash_lib::model::RedditReview;
use moddash_lib::model::ReviewStatus;

const ICON_HOST: &str = "https://styles.redditmedia.com/icons";

// (name, title, subscribers, engagement, avg upvotes, review, tags, nsfw)
#[rustfmt::skip]
const SUBREDDITS: &[(&str, &str, u64, f64, f64, Option<RedditReview>, &[&str], bool)] = &[
    ("mechanicalkeyboards", "Mechanical Keyboards", 1_284_000, 0.042, 310.0, Some(RedditReview::Ok), &["Tech", "Hobby"], false),
    ("cryptomoonshots", "Crypto Moon Shots", 2_010_500, 0.008, 95.0, Some(RedditReview::NonRelated), &["Finance"], false),
    ("sneakermarket", "Sneaker Market", 412_300, 0.061, 140.0, Some(RedditReview::NoSeller), &["Fashion", "Marketplace"], false),
    ("homelab", "Homelab", 845_900, 0.055, 420.0, None, &["Tech"], false),
    ("skincareaddiction", "Skincare Addiction", 1_930_000, 0.037, 260.0, None, &["Beauty"], false),
    ("watchexchange", "Watch Exchange", 298_400, 0.072, 88.0, Some(RedditReview::Ok), &["Marketplace"], false),
    ("fitness", "Fitness", 11_200_000, 0.019, 1_150.0, None, &[], false),
    ("gonewildcurvy", "Curvy", 3_400_000, 0.004, 610.0, Some(RedditReview::NonRelated), &[], true),
    ("plantedtank", "Planted Tank", 512_700, 0.048, 205.0, None, &["Hobby", "Pets"], false),
    ("buildapcsales", "Build a PC Sales", 1_650_000, 0.033, 540.0, Some(RedditReview::Ok), &["Tech", "Deals"], false),
    ("vintagefashion", "Vintage Fashion", 187_200, 0.009, 42.0, None, &["Fashion"], false),
    ("mealprepsunday", "Meal Prep Sunday", 3_890_000, 0.027, 880.0, None, &["Food"], false),
];

// (username, bio, followers, engagement, avg likes, review, tags, verified, private)
#[rustfmt::skip]
const CREATORS: &[(&str, &str, u64, f64, f64, Option<InstagramReview>, &[&str], bool, bool)] = &[
    ("lena.lifts", "Coach. Plant-based athlete.", 284_000, 0.051, 9_800.0, Some(InstagramReview::Ok), &["Fitness"], true, false),
    ("thriftwithmaya", "Secondhand finds every Friday", 92_400, 0.083, 4_100.0, None, &["Fashion"], false, false),
    ("crypto_kingz", "DM for signals", 1_120_000, 0.003, 1_900.0, Some(InstagramReview::NonRelated), &["Finance"], false, false),
    ("desk.setups", "Daily desk inspiration", 640_000, 0.029, 15_200.0, Some(InstagramReview::Pending), &["Tech"], false, false),
    ("noodleandco.kitchen", "", 38_900, 0.112, 2_600.0, None, &["Food"], false, true),
    ("glowbyjules", "Skincare, no filter", 1_480_000, 0.024, 31_000.0, Some(InstagramReview::Ok), &["Beauty"], true, false),
    ("trailrunner.sam", "Ultra runner / photographer", 57_300, 0.066, 3_050.0, None, &[], false, false),
    ("pixel.paws", "Two cats and a camera", 412_000, 0.041, 12_700.0, None, &["Pets"], false, false),
];

/// Builds the in-memory backend used by `--demo`.
pub fn backend() -> MemoryBackend {
    MemoryBackend::new(entities())
}

pub fn entities() -> Vec<ListedEntity> {
    let mut out = Vec::with_capacity(SUBREDDITS.len() + CREATORS.len());

    for (i, (name, title, audience, engagement, avg, review, tags, adult)) in
        SUBREDDITS.iter().enumerate()
    {
        let mut entity = ListedEntity::new(1000 + i as i64, Platform::Reddit, *name)
            .with_title(*title)
            .with_audience(*audience)
            .with_engagement(*engagement)
            .with_avg_performance(*avg)
            .with_tags(tags.iter().copied())
            .with_flags(EntityFlags {
                adult: *adult,
                ..EntityFlags::default()
            });
        // A few communities have no icon so the placeholder shows up.
        if i % 4 != 3 {
            entity = entity.with_icon(format!("{}/{}.png", ICON_HOST, name));
        }
        if let Some(review) = review {
            entity = entity.with_review(ReviewStatus::Reddit(*review));
        }
        out.push(entity);
    }

    for (i, (name, bio, audience, engagement, avg, review, tags, verified, private)) in
        CREATORS.iter().enumerate()
    {
        let mut entity = ListedEntity::new(2000 + i as i64, Platform::Instagram, *name)
            .with_audience(*audience)
            .with_engagement(*engagement)
            .with_avg_performance(*avg)
            .with_tags(tags.iter().copied())
            .with_flags(EntityFlags {
                verified: *verified,
                private: *private,
                ..EntityFlags::default()
            });
        if !bio.is_empty() {
            entity = entity.with_title(*bio);
        }
        if !private {
            entity = entity
                .with_icon(format!("https://cdn.example.net/ig/{}.jpg", name))
                .with_secondary_icon(format!("https://cdn.example.net/ig/hd/{}.jpg", name));
        }
        if let Some(review) = review {
            entity = entity.with_review(ReviewStatus::Instagram(*review));
        }
        out.push(entity);
    }

    out
}
