use damage_display_core::{
    ActorId, DamageSignal, DisplayConfig, Instigator, Limb, ServiceHandle, Visibility,
};
use damage_display_types::formatting::{format_remaining, format_total};

fn actor(raw: u64) -> Option<ActorId> {
    ActorId::valid(Some(ActorId(raw)))
}

pub async fn player_damage(
    handle: &ServiceHandle,
    from: u64,
    to: u64,
    amount: f32,
    armor: f32,
    denied: bool,
) -> Result<(), String> {
    handle
        .send(DamageSignal::PlayerDamaged {
            recipient: actor(to),
            instigator: actor(from),
            limb: Limb::default(),
            damage: amount,
            armor_multiplier: armor,
            allow: !denied,
        })
        .await
        .map_err(|e| e.to_string())
}

pub async fn structure_damage(handle: &ServiceHandle, from: u64, amount: u16) -> Result<(), String> {
    handle
        .send(DamageSignal::StructureDamageRequested {
            instigator: actor(from),
            pending_damage: amount,
            allow: true,
        })
        .await
        .map_err(|e| e.to_string())
}

/// Without `from` the hit is attributed to another creature.
pub async fn creature_damage(
    handle: &ServiceHandle,
    from: Option<u64>,
    amount: f32,
) -> Result<(), String> {
    let instigator = from
        .map(|raw| Instigator::Player(ActorId(raw)))
        .unwrap_or(Instigator::Creature);
    handle
        .send(DamageSignal::CreatureDamageRequested {
            instigator,
            damage: amount,
            allow: true,
        })
        .await
        .map_err(|e| e.to_string())
}

pub async fn disconnect(handle: &ServiceHandle, raw: u64) -> Result<(), String> {
    handle
        .send(DamageSignal::ParticipantDisconnected { actor: actor(raw) })
        .await
        .map_err(|e| e.to_string())?;
    println!("{raw} disconnected");
    Ok(())
}

pub async fn toggle(handle: &ServiceHandle, raw: u64) -> Result<(), String> {
    let visibility = handle
        .toggle_notifications(ActorId(raw))
        .await
        .map_err(|e| e.to_string())?;
    println!("[chat] {raw}: {}", visibility.toggle_message());
    Ok(())
}

pub async fn show(handle: &ServiceHandle, raw: u64) -> Result<(), String> {
    let status = handle
        .entry(ActorId(raw))
        .await
        .map_err(|e| e.to_string())?;
    match status {
        Some(status) => {
            let shown = match status.visibility {
                Visibility::Visible => "shown",
                Visibility::Hidden => "hidden",
            };
            println!(
                "{raw}: total {} ({shown}), clears in {}",
                format_total(status.total),
                format_remaining(status.remaining.as_secs_f32())
            );
        }
        None => println!("{raw}: no active total"),
    }
    Ok(())
}

pub async fn sweep(handle: &ServiceHandle) -> Result<(), String> {
    let evicted = handle.sweep_now().await.map_err(|e| e.to_string())?;
    println!("swept {evicted} expired totals");
    Ok(())
}

pub async fn show_stats(handle: &ServiceHandle) -> Result<(), String> {
    let stats = handle.stats().await.map_err(|e| e.to_string())?;
    println!("tracked: {}", stats.tracked);
    println!("preferences: {}", stats.preferences);
    println!("sweeps: {} (evicted {})", stats.sweeps, stats.evicted);
    Ok(())
}

pub fn show_settings(config: &DisplayConfig) {
    println!("show_secondary_channels = {}", config.show_secondary_channels);
    println!("channel_base_id = {}", config.channel_base_id);
    println!("clear_delay_secs = {}", config.clear_delay_secs);
    println!("sweep_interval_secs = {}", config.sweep_interval_secs);
    println!(
        "notifications_hidden_by_default = {}",
        config.notifications_hidden_by_default
    );
    println!("text_element = {}", config.text_element);
    println!("max_participants = {}", config.max_participants);
}
