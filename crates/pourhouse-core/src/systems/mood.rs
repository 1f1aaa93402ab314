//! Mood system - per-tick patience decay and forced departures.
//!
//! Runs after the lifecycle step for every active, non-leaving group,
//! whatever phase handler ran. Patience drains by phase and venue
//! condition; hitting zero removes the group on the spot and dents the
//! venue's public standing.

use hecs::{Entity, World};

use pourhouse_logic::clock::GameClock;
use pourhouse_logic::mood::{
    ambience_penalty, cleanliness_penalty, patience_decay, WALKOUT_POPULARITY_PENALTY,
    WALKOUT_SATISFACTION_PENALTY,
};
use pourhouse_logic::patrons::Phase;

use crate::components::{GroupProfile, Mood, Preferences, Venue, Visit};
use crate::events::{EventLog, VenueEventKind};

/// Decay patience and satisfaction for every group in the roster.
pub fn mood_system(world: &mut World, roster: &[Entity], clock: &GameClock, events: &mut EventLog) {
    for &group in roster {
        if !world.contains(group) {
            continue;
        }
        update_mood(world, group, clock, events);
    }
}

/// One mood step for one group.
pub fn update_mood(world: &mut World, group: Entity, clock: &GameClock, events: &mut EventLog) {
    let Ok(phase) = world.get::<&Visit>(group).map(|visit| visit.phase) else {
        return;
    };
    if phase == Phase::Leaving {
        return;
    }

    let Ok(venue_entity) = world.get::<&GroupProfile>(group).map(|profile| profile.venue) else {
        return;
    };
    // Venue gone: the lifecycle step removes the group; nothing to decay.
    let venue_state = world
        .get::<&Venue>(venue_entity)
        .map(|venue| (venue.cleanliness, venue.music_volume, venue.lighting_level))
        .ok();
    let Some((cleanliness, music_volume, lighting_level)) = venue_state else {
        return;
    };

    let (music_pref, lighting_pref) = match world.get::<&Preferences>(group) {
        Ok(prefs) => (prefs.music, prefs.lighting),
        Err(_) => (music_volume, lighting_level),
    };

    let out_of_patience = {
        let Ok(mut mood) = world.get::<&mut Mood>(group) else { return };
        mood.spend_patience(patience_decay(phase));
        mood.spend_patience(cleanliness_penalty(cleanliness));

        for (preference, setting) in [(music_pref, music_volume), (lighting_pref, lighting_level)] {
            let penalty = ambience_penalty(preference, setting);
            mood.spend_patience(penalty.patience);
            mood.adjust_satisfaction(-penalty.satisfaction);
        }

        mood.is_out_of_patience()
    };

    if out_of_patience {
        if let Ok(mut venue) = world.get::<&mut Venue>(venue_entity) {
            venue.popularity = (venue.popularity - WALKOUT_POPULARITY_PENALTY).max(0.0);
            venue.customer_satisfaction =
                (venue.customer_satisfaction - WALKOUT_SATISFACTION_PENALTY).max(0.0);
        }
        events.record(
            VenueEventKind::WalkedOut,
            group,
            venue_entity,
            *clock,
            format!("gave up while {}", phase.label()),
        );
        let _ = world.despawn(group);
    }
}
