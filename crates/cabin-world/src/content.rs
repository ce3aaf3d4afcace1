//! The Cabin's rooms, items and wildlife pool.

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::WorldResult;
use crate::item::{Item, ItemTrait};
use crate::map::GameMap;
use crate::requirement::Requirement;
use crate::room::Room;
use crate::wildlife::{Wildlife, WildlifeTrait};

/// Room the player starts in.
pub const START_ROOM: &str = "wilderness_start";

/// Every item in the Cabin.
pub fn item_catalogue() -> Vec<Item> {
    use ItemTrait::*;
    vec![
        Item::new("rope", "A length of sturdy rope, weathered but strong.")
            .with_traits([Carryable, Usable, Throwable])
            .with_room_description("A coiled rope lies on the ground."),
        Item::new(
            "matches",
            "A small box of wooden matches. The striking surface is worn.",
        )
        .with_traits([Carryable, Usable, Flammable])
        .with_room_description("A matchbox sits on the surface."),
        Item::new("key", "A rusted iron key, cold to the touch.")
            .with_traits([Carryable, Usable])
            .with_room_description("A rusted key glints in the dim light."),
        Item::new("stone", "A smooth river stone, heavy in your hand.")
            .with_traits([Carryable, Throwable, Weapon])
            .with_room_description("A smooth stone rests on the ground."),
        Item::new("stick", "A dry branch, brittle but useful.")
            .with_traits([Carryable, Throwable, Flammable])
            .with_room_description("A dry stick lies nearby."),
        Item::new(
            "knife",
            "A hunting knife with a bone handle. The blade is sharp.",
        )
        .with_traits([Carryable, Usable, Weapon])
        .with_room_description("A hunting knife sits on the surface."),
        Item::new(
            "berries",
            "A handful of dark berries. They look edible but you're not sure.",
        )
        .with_traits([Carryable, Edible])
        .with_room_description("Dark berries grow on a nearby bush."),
        Item::new(
            "amulet",
            "An ancient amulet with strange markings. It feels wrong.",
        )
        .with_traits([Carryable, Cursed])
        .with_room_description("An amulet with strange markings hangs from a branch."),
        Item::new(
            "firewood",
            "Dry logs, perfect for burning. They'll keep you warm.",
        )
        .with_traits([Carryable, Flammable])
        .with_room_description("A stack of dry firewood is piled neatly."),
        Item::new(
            "circuit breaker",
            "The main electrical panel. The main breaker is in the OFF position.",
        )
        .with_traits([Usable])
        .with_room_description("A circuit breaker panel is mounted on the wall."),
        Item::new("light switch", "An old toggle switch by the door.")
            .with_traits([Usable])
            .with_room_description("A light switch sits beside the door."),
        Item::new("fireplace", "A stone hearth, black with old soot.")
            .with_traits([Usable])
            .with_room_description("A cold fireplace waits against the far wall."),
    ]
}

/// Animals that may roam the outdoor rooms.
pub fn wildlife_pool() -> Vec<Wildlife> {
    use WildlifeTrait::*;
    vec![
        Wildlife::new(
            "reindeer",
            "A large reindeer with impressive antlers, standing quietly in the snow.",
        )
        .with_traits([Docile, Massive])
        .with_sound("You hear the soft crunch of hooves on snow and a gentle snort.")
        .with_visual(
            "A reindeer stands motionless in the clearing, its breath visible in the cold air.",
        ),
        Wildlife::new(
            "fox",
            "A red fox with a bushy tail, watching you with intelligent eyes.",
        )
        .with_traits([Docile, Skittish, Curious])
        .with_sound("A soft rustling in the underbrush, followed by a quiet bark.")
        .with_visual("A fox sits on a fallen log, its ears twitching as it watches you."),
        Wildlife::new(
            "mountain hare",
            "A white mountain hare, perfectly camouflaged against the snow.",
        )
        .with_traits([Docile, Fast, Skittish])
        .with_sound("A quick rustle of movement through the snow.")
        .with_visual("A white hare sits motionless, its ears alert and twitching."),
        Wildlife::new(
            "wolf",
            "A gray wolf with yellow eyes, watching you with predatory intensity.",
        )
        .with_traits([Vicious, Skittish, Pack])
        .with_sound("A low, menacing growl echoes through the trees.")
        .with_visual("A wolf stands in the shadows, its yellow eyes fixed on you."),
        Wildlife::new(
            "brown bear",
            "A massive brown bear, its powerful frame dominating the clearing.",
        )
        .with_traits([Vicious, Massive, Solitary])
        .with_sound("A deep, rumbling growl that makes your bones vibrate.")
        .with_visual("A brown bear stands on its hind legs, towering over you."),
        Wildlife::new(
            "wolverine",
            "A stocky wolverine with dark fur, its eyes gleaming with aggression.",
        )
        .with_traits([Vicious, Tough, Elusive])
        .with_sound("A harsh, guttural snarl from the underbrush.")
        .with_visual("A wolverine emerges from the shadows, its teeth bared."),
        Wildlife::new(
            "eurasian lynx",
            "A large lynx with tufted ears, moving silently through the trees.",
        )
        .with_traits([Elusive, Silent, Predatory])
        .with_sound("Complete silence, but you sense something watching.")
        .with_visual("You catch only a glimpse of movement, something large and feline."),
        Wildlife::new(
            "pine marten",
            "A small, agile pine marten darting through the branches above.",
        )
        .with_traits([Elusive, Arboreal, Thief])
        .with_sound("A soft rustling in the tree branches overhead.")
        .with_visual("A flash of brown fur disappears into the canopy."),
        Wildlife::new(
            "snowy owl",
            "A large snowy owl perched high in a tree, watching silently.",
        )
        .with_traits([Ambient, Watchful, Nocturnal])
        .with_sound("A soft hoot echoes through the night air.")
        .with_visual("A snowy owl sits motionless in a tree, its yellow eyes fixed on you."),
        Wildlife::new(
            "eagle owl",
            "A massive eagle owl with dark plumage, its wingspan impressive.",
        )
        .with_traits([Ambient, Predatory, Massive, Nocturnal])
        .with_sound("A deep, resonant hoot that carries through the forest.")
        .with_visual("An eagle owl spreads its massive wings, casting a shadow across the snow."),
        Wildlife::new(
            "raven",
            "A large raven with glossy black feathers, perched on a branch.",
        )
        .with_traits([Ambient, Watchful, Symbolic])
        .with_sound("A harsh caw echoes through the trees.")
        .with_visual("A raven sits on a branch, its black eyes watching you intently."),
        Wildlife::new(
            "capercaillie",
            "A large grouse-like bird with dark plumage, standing in the snow.",
        )
        .with_traits([Ambient, Startling, Vicious])
        .with_sound("A sudden burst of wingbeats and a startled call.")
        .with_visual("A capercaillie stands motionless, its dark form blending with the shadows."),
    ]
}

/// Draw between one and `max` distinct animals from the pool.
pub fn random_wildlife(pool: &[Wildlife], max: usize, rng: &mut StdRng) -> Vec<Wildlife> {
    if max == 0 || pool.is_empty() {
        return Vec::new();
    }
    let count = rng.random_range(1..=max).min(pool.len());
    let mut remaining = pool.to_vec();
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let idx = rng.random_range(0..remaining.len());
        picked.push(remaining.swap_remove(idx));
    }
    picked
}

fn stock(name: &str, catalogue: &[Item]) -> Item {
    catalogue
        .iter()
        .find(|i| i.name == name)
        .cloned()
        .unwrap_or_else(|| Item::new(name, ""))
}

/// Build the Cabin with wildlife placed by `rng`.
pub fn the_cabin(rng: &mut StdRng) -> WorldResult<GameMap> {
    let items = item_catalogue();
    let pool = wildlife_pool();
    let item = |name: &str| stock(name, &items);

    let mut rooms = vec![
        Room::new(
            START_ROOM,
            "Wilderness",
            "You stand at the edge of your family's forest, where the gravel road thins into a \
             winding track and vanishes beneath the trees. The air is cold, and still. Behind you, \
             the rented car clicks as it cools. Ahead, a wall of pine and birch closes in, tall, \
             dark and familiar. Somewhere past them lies the cabin. Yours now, though it never \
             quite feels like it. A blur across the northern camera, then silence, was enough to \
             bring you back.",
        )
        .with_item(item("stick"))
        .with_item(item("stone"))
        .with_exit("north", "cabin_clearing")
        .with_max_wildlife(1),
        Room::new(
            "cabin_clearing",
            "The Clearing",
            "You can see the faint outline of The Cabin ahead, blurred by distance and dark.",
        )
        .with_item(item("rope"))
        .with_exit("south", START_ROOM)
        .with_exit("cabin", "cabin_main")
        .with_max_wildlife(1),
        Room::new(
            "cabin_main",
            "The Cabin",
            "You are inside a small cabin. You take a deep breath, inhaling the scent of wood.\n\
             As you exhale, familiarity wraps around you.\n\n\
             This is your cabin.\n\n\
             A door leads to the konttori (office).",
        )
        .with_item(item("matches"))
        .with_item(item("key"))
        .with_item(item("light switch"))
        .with_item(item("fireplace"))
        .with_exit("out", "cabin_clearing")
        .with_exit("north", "konttori"),
        Room::new(
            "konttori",
            "Konttori",
            "A small office space. Papers are scattered across a desk.\n\
             The circuit breaker panel hums quietly on the wall.",
        )
        .with_item(item("circuit breaker"))
        .with_exit("south", "cabin_main")
        .with_exit("north", "cabin_grounds_main"),
        Room::new(
            "cabin_grounds_main",
            "Cabin Grounds",
            "The area around The Cabin. Snow is packed thin where feet remember paths.\n\
             A woodshed stands nearby, its door slightly ajar.",
        )
        .with_item(item("firewood"))
        .with_exit("south", "konttori")
        .with_exit("north", "lakeside")
        .with_exit("clearing", "cabin_clearing")
        .with_max_wildlife(1),
        Room::new(
            "lakeside",
            "Lakeside",
            "You stand by the edge of a dark lake. The water is still and black.\n\
             A path leads further into the woods.",
        )
        .with_exit("south", "cabin_grounds_main")
        .with_exit("north", "wood_track")
        .with_exit("grounds", "cabin_grounds_main")
        .with_max_wildlife(1),
        Room::new(
            "wood_track",
            "Wood Track",
            "A narrow track winds through the dense woods. The trees press close on either side.\n\
             The path is well-worn but overgrown in places.",
        )
        .with_item(item("knife"))
        .with_exit("south", "lakeside")
        .with_exit("north", "old_woods")
        .with_exit("lakeside", "lakeside")
        .with_max_wildlife(2),
        Room::new(
            "old_woods",
            "Old Woods",
            "Ancient trees tower overhead, their branches interlocking to form a dark canopy.\n\
             The air is thick with the scent of moss and decay. This place feels old, older than memory.",
        )
        .with_item(item("amulet"))
        .with_exit("south", "wood_track")
        .with_exit("track", "wood_track")
        .with_requirement(Requirement::fear_below(80))
        .with_max_wildlife(2),
    ];

    for room in &mut rooms {
        room.wildlife = random_wildlife(&pool, room.max_wildlife, rng);
    }

    let layout: Vec<String> = rooms.iter().map(|r| r.id.clone()).collect();
    Ok(GameMap::new(rooms, START_ROOM)?
        .with_catalogue(items)
        .with_layout(layout, ["cabin_main", "konttori", "cabin_grounds_main"]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_cabin() -> GameMap {
        the_cabin(&mut StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn starts_in_wilderness() {
        let map = test_cabin();
        assert_eq!(map.current_room_id(), START_ROOM);
        assert_eq!(map.current_room().exit("north"), Some("cabin_clearing"));
        assert!(map.current_room().has_item("stone"));
    }

    #[test]
    fn indoor_rooms_have_no_wildlife() {
        let map = test_cabin();
        for id in ["cabin_main", "konttori"] {
            assert!(map.room(id).unwrap().wildlife.is_empty());
        }
    }

    #[test]
    fn outdoor_wildlife_within_bounds() {
        let map = test_cabin();
        for room in map.rooms() {
            assert!(room.wildlife.len() <= room.max_wildlife);
            if room.max_wildlife > 0 {
                assert!(!room.wildlife.is_empty());
            }
        }
    }

    #[test]
    fn seeded_placement_is_stable() {
        let a = test_cabin();
        let b = test_cabin();
        for (ra, rb) in a.rooms().iter().zip(b.rooms()) {
            assert_eq!(ra.wildlife_names(), rb.wildlife_names());
        }
    }

    #[test]
    fn catalogue_knows_fixtures() {
        let map = test_cabin();
        assert!(map.catalogue_item("circuit breaker").is_some());
        assert!(!map.catalogue_item("circuit breaker").unwrap().is_carryable());
        assert_eq!(map.known_items().len(), 12);
    }

    #[test]
    fn random_wildlife_distinct() {
        let pool = wildlife_pool();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let picked = random_wildlife(&pool, 2, &mut rng);
            assert!(!picked.is_empty() && picked.len() <= 2);
            if picked.len() == 2 {
                assert_ne!(picked[0].name, picked[1].name);
            }
        }
        assert!(random_wildlife(&pool, 0, &mut rng).is_empty());
    }
}
