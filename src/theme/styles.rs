//! Global CSS styles for TreeHouse.
//!
//! Light, image-first look: white canvas, soft borders, pastel hover glows.
//! `.theme-dark` on the root element swaps the palette.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  --canvas: #ffffff;
  --surface: #ffffff;
  --surface-muted: #f4f4f5;
  --border: #e5e7eb;
  --border-strong: #9ca3af;

  --text-primary: #111111;
  --text-secondary: #4b5563;
  --text-muted: #9ca3af;

  --moss: #6a6e4a;
  --leaf: #16a34a;
  --sky: #2563eb;
  --danger: #dc2626;

  --radius-card: 12px;
  --radius-frame: 8px;

  --font-sans: 'Inter', system-ui, -apple-system, 'Segoe UI', sans-serif;

  --header-bg: rgba(255, 255, 255, 0.9);
  --modal-bg: rgba(255, 255, 255, 0.85);

  --transition-fast: 150ms ease;
  --transition-normal: 300ms ease-out;
}

.theme-dark {
  --canvas: #111111;
  --surface: #1c1c1c;
  --surface-muted: #262626;
  --border: #333333;
  --border-strong: #4b5563;

  --text-primary: #f5f5f5;
  --text-secondary: #d1d5db;
  --text-muted: #6b7280;

  --moss: #c9cda6;
  --header-bg: rgba(17, 17, 17, 0.7);
  --modal-bg: rgba(18, 18, 18, 0.95);
}

.app-root {
  min-height: 100vh;
  background: var(--canvas);
  color: var(--text-primary);
  transition: background var(--transition-normal), color var(--transition-normal);
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  font-size: 16px;
  -webkit-font-smoothing: antialiased;
}

body {
  font-family: var(--font-sans);
  background: var(--canvas);
  color: var(--text-primary);
  line-height: 1.5;
  min-height: 100vh;
}

button {
  font: inherit;
  cursor: pointer;
}

.fatal-error {
  padding: 4rem 2rem;
  text-align: center;
  color: var(--danger);
}

/* === Buttons & Inputs === */
.btn-primary {
  padding: 0.75rem 1rem;
  border: none;
  border-radius: 8px;
  background: var(--sky);
  color: #fff;
  font-weight: 500;
  transition: background var(--transition-fast);
}

.btn-primary:hover {
  background: #1d4ed8;
}

.btn-secondary {
  padding: 0.4rem 0.9rem;
  border: 1px solid var(--border-strong);
  border-radius: 999px;
  background: var(--surface);
  color: var(--text-primary);
}

.btn-disabled {
  padding: 0.75rem 1rem;
  border: none;
  border-radius: 8px;
  background: #374151;
  color: #fff;
  opacity: 0.6;
  cursor: not-allowed;
}

.input-field {
  width: 100%;
  padding: 0.65rem 0.8rem;
  border: 1px solid var(--border);
  border-radius: 8px;
  background: var(--surface);
  color: var(--text-primary);
}

.input-field:focus {
  outline: 2px solid var(--sky);
  outline-offset: -1px;
}

/* === Header === */
.app-header {
  position: sticky;
  top: 0;
  z-index: 50;
  display: flex;
  align-items: center;
  justify-content: space-between;
  height: 4rem;
  padding: 0 1.5rem;
  background: var(--header-bg);
  backdrop-filter: blur(8px);
  border-bottom: 1px solid var(--border);
}

.app-title {
  font-size: 1.25rem;
  font-weight: 700;
  color: var(--text-primary);
  text-decoration: none;
}

.app-header__center {
  display: flex;
  align-items: center;
  gap: 1rem;
}

.app-header__icons {
  display: flex;
  gap: 0.5rem;
}

.header-icon {
  width: 2.5rem;
  height: 2.5rem;
  border: none;
  border-radius: 50%;
  background: transparent;
  font-size: 1.25rem;
  transition: background var(--transition-fast), transform var(--transition-fast);
}

.header-icon:hover {
  background: rgba(127, 127, 127, 0.2);
  transform: translateY(-2px);
}

/* === Search === */
.search-bar {
  border-radius: 9999px;
  transition: box-shadow var(--transition-normal);
}

.search-bar__input {
  width: 300px;
  padding: 0.6rem 1rem;
  border: 1px solid var(--border-strong);
  border-radius: 9999px;
  background: #fff;
  color: #000;
  text-align: center;
  font-size: 0.9rem;
}

.search-bar__input:focus {
  outline: 1px solid var(--moss);
}

/* === Notice === */
.notice {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 1rem;
  margin: 0.75rem 1rem 0;
  padding: 0.6rem 1rem;
  border: 1px solid #fcd34d;
  border-radius: 8px;
  background: #fffbeb;
  color: #92400e;
  font-size: 0.9rem;
}

.notice__dismiss {
  border: none;
  background: none;
  color: inherit;
}

/* === Settings === */
.settings-panel {
  max-width: 32rem;
  margin: 4rem auto;
  padding: 2rem;
  display: flex;
  flex-direction: column;
  gap: 1rem;
  text-align: center;
  background: var(--modal-bg);
  border: 1px solid var(--border);
  border-radius: 16px;
  box-shadow: 0 20px 48px rgba(0, 0, 0, 0.15);
}

.settings-panel__title {
  font-size: 1.5rem;
  font-weight: 600;
  color: var(--moss);
}

.settings-panel__row {
  display: flex;
  align-items: center;
  justify-content: center;
  gap: 1rem;
}

/* === Auth Control === */
.auth-control-wrap {
  position: relative;
}

.auth-control {
  width: 2.5rem;
  height: 2.5rem;
  border-radius: 50%;
  overflow: hidden;
  display: flex;
  align-items: center;
  justify-content: center;
  transition: border-color var(--transition-fast), background var(--transition-fast);
}

.auth-control--signin {
  border: none;
  background: #6b7280;
  color: #fff;
  font-size: 1.5rem;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
}

.auth-control--signin:hover {
  background: var(--leaf);
}

.auth-control--signin:disabled {
  opacity: 0.5;
  cursor: wait;
}

.auth-control--avatar {
  border: 2px solid var(--border-strong);
  background: #4b5563;
  color: #fff;
}

.auth-control--avatar:hover {
  border-color: var(--leaf);
}

.auth-control--avatar img {
  width: 100%;
  height: 100%;
  object-fit: cover;
}

.auth-menu {
  position: absolute;
  right: 0;
  top: calc(100% + 0.5rem);
  min-width: 14rem;
  padding: 0.5rem;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: 12px;
  box-shadow: 0 12px 32px rgba(0, 0, 0, 0.12);
  display: flex;
  flex-direction: column;
}

.auth-menu__who {
  display: flex;
  flex-direction: column;
  padding: 0.5rem 0.75rem;
  border-bottom: 1px solid var(--border);
  margin-bottom: 0.25rem;
}

.auth-menu__email {
  font-size: 0.8rem;
  color: var(--text-muted);
}

.auth-menu__item {
  padding: 0.5rem 0.75rem;
  border: none;
  border-radius: 8px;
  background: none;
  color: var(--text-primary);
  text-align: left;
  text-decoration: none;
}

.auth-menu__item:hover {
  background: var(--surface-muted);
}

/* === Login Modal === */
.modal-backdrop {
  position: fixed;
  inset: 0;
  z-index: 1000;
  display: flex;
  align-items: center;
  justify-content: center;
  padding: 1rem;
  background: rgba(0, 0, 0, 0.5);
  backdrop-filter: blur(4px);
}

.login-modal {
  position: relative;
  width: 100%;
  max-width: 24rem;
  padding: 1.5rem;
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
  text-align: center;
  background: var(--modal-bg);
  backdrop-filter: blur(16px);
  border: 1px solid #d1d5db;
  border-radius: 16px;
  box-shadow: 0 20px 48px rgba(0, 0, 0, 0.2);
}

.login-modal__close {
  position: absolute;
  top: 0.75rem;
  right: 0.75rem;
  border: none;
  background: none;
  color: var(--text-muted);
  font-size: 1.25rem;
}

.login-modal__title {
  margin-bottom: 0.75rem;
  font-size: 1.5rem;
  font-weight: 600;
  color: var(--moss);
}

.login-modal__error {
  font-size: 0.85rem;
  color: var(--danger);
}

.login-modal__fineprint {
  margin-top: 0.75rem;
  font-size: 0.75rem;
  color: var(--text-muted);
}

/* === Create Seed Modal === */
.seed-modal {
  position: relative;
  width: 100%;
  max-width: 24rem;
  min-height: 28rem;
  padding: 1.5rem;
  display: flex;
  flex-direction: column;
  gap: 1rem;
  background: var(--modal-bg);
  color: var(--text-secondary);
  backdrop-filter: blur(16px);
  border-radius: 24px;
  box-shadow: 0 20px 48px rgba(0, 0, 0, 0.25);
}

.seed-modal__drop {
  position: relative;
  height: 10rem;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  overflow: hidden;
  border: 2px dashed var(--border-strong);
  border-radius: 16px;
  background: transparent;
  color: var(--text-muted);
}

.seed-modal__drop:hover {
  border-color: var(--text-muted);
}

.seed-modal__plus {
  font-size: 2rem;
  line-height: 1;
}

.seed-modal__preview {
  position: absolute;
  inset: 0;
  width: 100%;
  height: 100%;
  object-fit: cover;
  opacity: 0.9;
}

.seed-modal__change {
  position: relative;
  padding: 0.25rem 0.75rem;
  border-radius: 9999px;
  background: rgba(0, 0, 0, 0.4);
  color: #fff;
  font-size: 0.85rem;
  font-weight: 600;
  opacity: 0;
  transition: opacity var(--transition-fast);
}

.seed-modal__drop:hover .seed-modal__change {
  opacity: 1;
}

.seed-modal__description {
  resize: none;
}

.btn-plant {
  margin-top: auto;
  padding: 0.6rem;
  border: none;
  border-radius: 8px;
  background: var(--leaf);
  color: #fff;
  font-weight: 600;
}

.btn-plant:disabled {
  opacity: 0.5;
  cursor: not-allowed;
}

/* === Feed === */
.feed-main {
  padding: 1rem 1rem 4rem;
}

.feed-error {
  display: flex;
  align-items: center;
  justify-content: center;
  gap: 1rem;
  padding: 1rem;
  color: var(--danger);
}

.feed-loading-more {
  display: flex;
  justify-content: center;
  padding: 1.5rem;
}

.feed-end {
  padding: 2rem;
  text-align: center;
  color: var(--text-muted);
}

.scroll-sentinel {
  height: 1px;
}

.loading-state {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 1rem;
  padding: 4rem;
  color: var(--text-muted);
}

.loading-spinner {
  width: 1.75rem;
  height: 1.75rem;
  border: 3px solid var(--border);
  border-top-color: var(--leaf);
  border-radius: 50%;
  animation: spin 0.9s linear infinite;
}

@keyframes spin {
  to { transform: rotate(360deg); }
}

/* === Card Grid === */
.card-grid {
  display: flex;
  align-items: flex-start;
}

.card-grid__column {
  flex: 1 1 0;
  min-width: 0;
  display: flex;
  flex-direction: column;
}

.card-grid__empty {
  padding: 2.5rem 0;
  text-align: center;
  color: #6b7280;
}

/* === Seed Card === */
.seed-card {
  position: relative;
  z-index: 20;
  padding: 2px;
  border: 1px solid var(--border);
  border-radius: var(--radius-card);
  background: var(--surface);
  box-shadow: 0 4px 6px rgba(0, 0, 0, 0.08);
  cursor: pointer;
  animation: card-in 0.5s ease-out;
  transition: transform var(--transition-fast);
}

.seed-card:hover {
  transform: translateY(-4px) scale(1.015);
}

@keyframes card-in {
  from { opacity: 0; transform: translateY(20px); }
  to { opacity: 1; transform: none; }
}

.seed-card__glow {
  position: absolute;
  inset: -1px;
  z-index: 0;
  border-radius: 16px;
  filter: blur(10px);
  pointer-events: none;
  transition: opacity var(--transition-normal);
}

.seed-card__frame {
  position: relative;
  z-index: 10;
  width: 100%;
  overflow: hidden;
  border-radius: var(--radius-frame);
  background: var(--surface-muted);
}

.aspect-square { aspect-ratio: 1 / 1; }
.aspect-wide { aspect-ratio: 16 / 9; }
.aspect-classic { aspect-ratio: 4 / 3; }
.aspect-phone { aspect-ratio: 9 / 16; }

.seed-card__img {
  width: 100%;
  height: 100%;
  object-fit: cover;
  display: block;
}

.seed-card__stats {
  position: absolute;
  left: 0.375rem;
  bottom: 0.375rem;
  padding: 0.25rem 0.5rem;
  border-radius: 6px;
  font-size: 0.75rem;
  color: #f3f4f6;
  text-shadow: 0 1px 1px rgba(0, 0, 0, 0.7);
  background: linear-gradient(to top, rgba(0, 0, 0, 0.6), transparent);
  pointer-events: none;
}

.seed-card__dot {
  margin: 0 0.375rem;
}

/* === Lightbox === */
.lightbox {
  position: fixed;
  inset: 0;
  z-index: 900;
  display: flex;
  align-items: center;
  justify-content: center;
  background: rgba(0, 0, 0, 0.85);
  outline: none;
}

.lightbox__img {
  max-width: 92vw;
  max-height: 92vh;
  border-radius: var(--radius-frame);
  box-shadow: 0 20px 60px rgba(0, 0, 0, 0.5);
  cursor: default;
}

.lightbox__close {
  position: absolute;
  top: 1rem;
  right: 1.25rem;
  border: none;
  background: none;
  color: #fff;
  font-size: 1.75rem;
}

/* === Profile === */
.profile-signin {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 1rem;
  padding: 4rem;
  color: var(--text-secondary);
}

.profile-banner {
  position: relative;
  width: 100%;
  height: 20rem;
  overflow: hidden;
}

.profile-banner__img {
  width: 100%;
  height: 100%;
  object-fit: cover;
}

.profile-banner__fallback {
  width: 100%;
  height: 100%;
  background: linear-gradient(135deg, #d9f99d 0%, #a7f3d0 45%, #bae6fd 100%);
}

.profile-banner__loading {
  width: 100%;
  height: 100%;
  background: #e5e5e5;
  animation: pulse 1.5s ease-in-out infinite;
}

@keyframes pulse {
  50% { opacity: 0.5; }
}

.profile-banner__upload {
  position: absolute;
  left: 50%;
  bottom: 1rem;
  transform: translateX(-50%);
  opacity: 0;
  transition: opacity var(--transition-fast);
}

.profile-banner:hover .profile-banner__upload {
  opacity: 1;
}

.profile-header {
  display: flex;
  align-items: center;
  gap: 1.5rem;
  padding: 1.5rem;
}

.profile-avatar {
  position: relative;
  width: 9rem;
  height: 9rem;
  flex-shrink: 0;
  border-radius: 50%;
  border: 4px solid #fff;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
  background: #e5e5e5;
  overflow: hidden;
  display: flex;
  align-items: center;
  justify-content: center;
}

.profile-avatar__img {
  width: 100%;
  height: 100%;
  object-fit: cover;
}

.profile-avatar__initial {
  font-size: 3rem;
  font-weight: 700;
  color: var(--moss);
}

.profile-avatar__upload {
  position: absolute;
  bottom: 0.5rem;
  right: 50%;
  transform: translateX(50%);
}

.profile-name {
  font-size: 1.25rem;
  font-weight: 700;
}

.profile-stats {
  display: flex;
  gap: 0.75rem;
  margin-top: 0.25rem;
  font-size: 0.875rem;
}

.profile-posts {
  padding: 3rem 1rem 4rem;
}

/* === Image Upload === */
.image-upload {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 0.5rem;
}

.image-upload-btn {
  padding: 0.3rem 0.8rem;
  border: none;
  border-radius: 6px;
  background: #fff;
  color: #000;
  font-size: 0.875rem;
  box-shadow: 0 2px 6px rgba(0, 0, 0, 0.2);
}

.image-upload-btn--icon {
  width: 2rem;
  height: 2rem;
  border: none;
  border-radius: 50%;
  background: rgba(255, 255, 255, 0.9);
  box-shadow: 0 2px 6px rgba(0, 0, 0, 0.2);
}

.image-upload-btn:disabled,
.image-upload-btn--icon:disabled {
  opacity: 0.7;
  cursor: wait;
}

.image-upload__preview {
  max-width: 10rem;
  max-height: 10rem;
  border-radius: 6px;
  box-shadow: 0 2px 8px rgba(0, 0, 0, 0.25);
}

.image-upload__error {
  max-width: 16rem;
  padding: 0.25rem 0.5rem;
  border-radius: 6px;
  background: rgba(255, 255, 255, 0.9);
  font-size: 0.8rem;
  color: var(--danger);
}
"#;
