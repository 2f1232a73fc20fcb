//! Routes a `HostCommand` to its transition.

use std::time::Instant;

use griffin_common::EngineError;
use griffin_webview::RenderEngine;

use super::TabHost;
use crate::commands::HostCommand;

impl<E: RenderEngine> TabHost<E> {
    pub async fn handle(&mut self, command: HostCommand) -> Result<(), EngineError> {
        match command {
            HostCommand::Ready => {}

            HostCommand::SelectTab { tab_id } => self.select(&tab_id).await?,
            HostCommand::CreateTab {
                title,
                url,
                activate,
            } => {
                self.create_tab(&title, &url, activate).await?;
            }
            HostCommand::CreateGrid { title } => {
                self.create_grid(&title).await?;
            }
            HostCommand::OpenSettings => {
                self.open_settings().await?;
            }
            HostCommand::DeleteTab { tab_id } => self.delete(&tab_id).await?,
            HostCommand::RestoreTab { tab_id } => self.restore(&tab_id).await?,
            HostCommand::RenameTab { tab_id, title } => {
                self.rename(&tab_id, &title);
            }
            HostCommand::SetTabColor { tab_id, color } => {
                self.set_color(&tab_id, color);
            }
            HostCommand::SortByColor => self.sort_by_color(),
            HostCommand::ReorderTab { from, to } => {
                self.reorder(from, to);
            }
            HostCommand::SetTabOrder { order } => self.set_order(&order),

            HostCommand::SetGridSlot {
                grid_id,
                slot,
                tab_id,
            } => self.set_grid_slot(&grid_id, slot, tab_id).await?,
            HostCommand::SetGridMode { grid_id, mode } => self.set_grid_mode(&grid_id, mode).await?,
            HostCommand::SplitPane {
                grid_id,
                target,
                tab_id,
                direction,
            } => self.split_pane(&grid_id, &target, tab_id, direction).await?,
            HostCommand::ClosePane { grid_id, tab_id } => self.close_pane(&grid_id, &tab_id).await?,
            HostCommand::ReplacePane {
                grid_id,
                current,
                replacement,
            } => self.replace_pane(&grid_id, &current, replacement).await?,
            HostCommand::SwapPanes { grid_id, a, b } => self.swap_panes(&grid_id, &a, &b).await?,
            HostCommand::ResizePane {
                grid_id,
                tab_id,
                delta,
            } => self.resize_pane(&grid_id, &tab_id, delta).await?,

            HostCommand::ToggleMultiView => {
                self.toggle_multi_view().await?;
            }
            HostCommand::SetMultiViewSlot { slot, tab_id } => {
                self.set_multi_view_slot(slot, tab_id).await?
            }
            HostCommand::SetOverlayOpen { open } => self.set_overlay_open(open).await?,

            HostCommand::RegionMounted { rect } => self.region_mounted(rect).await?,
            HostCommand::RegionChanged { rect } => self.region_changed(rect, Instant::now()),

            HostCommand::EnsureSurface { tab_id } => self.ensure_surface(&tab_id).await?,
            HostCommand::HideSurface { tab_id } => self.hide_surface(&tab_id),
            HostCommand::DestroySurface { tab_id } => self.destroy_surface(&tab_id).await,
            HostCommand::SetSurfaceBounds { tab_id, rect } => self.set_surface_bounds(&tab_id, rect),

            HostCommand::AddChart { title, url } => {
                self.add_chart(&title, &url);
            }
            HostCommand::UpdateChart { id, title, url } => {
                self.update_chart(&id, &title, &url);
            }
            HostCommand::DeleteChart { id } => {
                self.remove_chart(&id);
            }
            HostCommand::ImportCharts { text } => {
                self.import_charts(&text);
            }
            HostCommand::OpenChart { id } => {
                self.open_chart(&id).await?;
            }

            HostCommand::SetInactivityTimeout { minutes } => {
                self.change_inactivity_timeout(minutes);
            }
        }
        Ok(())
    }
}
