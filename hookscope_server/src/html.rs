//! Embedded HTML dashboard for the webhook inspector

pub const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Hookscope</title>
    <style>
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #fafafa;
            color: #333;
            min-height: 100vh;
            font-size: 14px;
        }

        /* Header */
        header {
            background: #fff;
            border-bottom: 1px solid #e0e0e0;
            padding: 0.75rem 1rem;
            display: flex;
            justify-content: space-between;
            align-items: center;
            position: sticky;
            top: 0;
            z-index: 100;
        }
        .header-left { display: flex; align-items: center; gap: 1rem; }
        h1 { font-size: 1.1rem; font-weight: 600; color: #333; }
        .stats { display: flex; gap: 1.25rem; }
        .stat { text-align: right; }
        .stat .value { font-size: 1rem; font-weight: 600; }
        .stat .label { font-size: 0.7rem; color: #888; text-transform: uppercase; }

        main { max-width: 1100px; margin: 0 auto; padding: 1.25rem 1rem; }
        section {
            background: #fff;
            border: 1px solid #e0e0e0;
            border-radius: 6px;
            margin-bottom: 1.25rem;
        }
        .section-head {
            display: flex;
            justify-content: space-between;
            align-items: center;
            padding: 0.75rem 1rem;
            border-bottom: 1px solid #eee;
        }
        .section-head h2 { font-size: 0.95rem; font-weight: 600; }

        button {
            font-size: 0.8rem;
            padding: 0.35rem 0.75rem;
            border: 1px solid #d0d0d0;
            border-radius: 4px;
            background: #fff;
            cursor: pointer;
        }
        button:hover { background: #f5f5f5; }
        button.primary { background: #2563eb; border-color: #2563eb; color: #fff; }
        button.primary:hover { background: #1d4ed8; }
        button.danger { color: #b91c1c; }

        /* Endpoint list */
        .create-form {
            display: none;
            gap: 0.75rem;
            padding: 0.75rem 1rem;
            border-bottom: 1px solid #eee;
            background: #f9fafb;
            align-items: flex-end;
        }
        .create-form.open { display: flex; }
        .field label { display: block; font-size: 0.7rem; color: #666; margin-bottom: 0.2rem; }
        .field input {
            font-size: 0.8rem;
            padding: 0.35rem 0.5rem;
            border: 1px solid #d0d0d0;
            border-radius: 4px;
            width: 9rem;
        }
        .endpoint {
            display: flex;
            justify-content: space-between;
            align-items: center;
            padding: 0.6rem 1rem;
            border-bottom: 1px solid #f0f0f0;
            gap: 0.75rem;
        }
        .endpoint:last-child { border-bottom: none; }
        .endpoint .url {
            font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
            font-size: 0.75rem;
            color: #555;
            word-break: break-all;
        }
        .endpoint .meta { font-size: 0.72rem; color: #999; margin-top: 0.15rem; }
        .badge {
            font-size: 0.7rem;
            padding: 0.15rem 0.45rem;
            border-radius: 3px;
            font-weight: 500;
            white-space: nowrap;
        }
        .badge.active { background: #dcfce7; color: #166534; }
        .badge.expired, .badge.inactive { background: #fee2e2; color: #991b1b; }
        .badge.limit_reached { background: #fef9c3; color: #854d0e; }

        /* Filters */
        .filters {
            display: flex;
            gap: 0.5rem;
            padding: 0.6rem 1rem;
            border-bottom: 1px solid #eee;
            flex-wrap: wrap;
        }
        .filters input, .filters select {
            font-size: 0.8rem;
            padding: 0.35rem 0.5rem;
            border: 1px solid #d0d0d0;
            border-radius: 4px;
        }
        .filters input[name=search] { flex: 1; min-width: 10rem; }

        /* Request list */
        .request { border-bottom: 1px solid #f0f0f0; }
        .request:last-child { border-bottom: none; }
        .request-row {
            display: flex;
            align-items: center;
            gap: 0.75rem;
            padding: 0.5rem 1rem;
            cursor: pointer;
        }
        .request-row:hover { background: #f9fafb; }
        .method {
            font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
            font-size: 0.72rem;
            font-weight: 600;
            padding: 0.1rem 0.4rem;
            border-radius: 3px;
            background: #eef2ff;
            color: #3730a3;
        }
        .request-row .when { margin-left: auto; font-size: 0.72rem; color: #999; white-space: nowrap; }
        .request-row .ip { font-size: 0.75rem; color: #666; }
        .request-detail { display: none; padding: 0.6rem 1rem 0.9rem; background: #f9fafb; }
        .request-detail.open { display: block; }
        .request-detail h3 { font-size: 0.75rem; color: #666; margin: 0.5rem 0 0.25rem; }
        pre {
            font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
            font-size: 0.72rem;
            background: #fff;
            border: 1px solid #e5e5e5;
            border-radius: 4px;
            padding: 0.5rem;
            overflow-x: auto;
            white-space: pre-wrap;
            word-break: break-all;
        }
        .empty { padding: 1.25rem 1rem; color: #999; text-align: center; }
    </style>
</head>
<body>
    <header>
        <div class="header-left">
            <h1>Hookscope</h1>
            <span class="badge active" id="conn">live</span>
        </div>
        <div class="stats">
            <div class="stat"><div class="value" id="stat-endpoints">0</div><div class="label">Endpoints</div></div>
            <div class="stat"><div class="value" id="stat-active">0</div><div class="label">Active</div></div>
            <div class="stat"><div class="value" id="stat-requests">0</div><div class="label">Requests</div></div>
            <div class="stat"><div class="value" id="stat-today">0</div><div class="label">Today</div></div>
        </div>
    </header>

    <main>
        <section>
            <div class="section-head">
                <h2>Endpoints</h2>
                <button class="primary" id="new-endpoint">New Endpoint</button>
            </div>
            <div class="create-form" id="create-form">
                <div class="field">
                    <label>TTL (minutes)</label>
                    <input type="number" id="ttl" value="60" min="1" max="1440">
                </div>
                <div class="field">
                    <label>Max requests (optional)</label>
                    <input type="number" id="max-requests" value="100" min="1" placeholder="No limit">
                </div>
                <button class="primary" id="create">Create</button>
                <button id="cancel">Cancel</button>
            </div>
            <div id="endpoints"></div>
        </section>

        <section>
            <div class="section-head">
                <h2>Captured Requests</h2>
                <button id="clear-filters">Clear Filters</button>
            </div>
            <div class="filters">
                <input name="search" id="f-search" placeholder="Search body, IP, headers...">
                <select id="f-method">
                    <option value="">All methods</option>
                    <option>POST</option><option>GET</option><option>PUT</option>
                    <option>PATCH</option><option>DELETE</option>
                </select>
                <select id="f-content-type">
                    <option value="">All content types</option>
                    <option value="json">JSON</option>
                    <option value="form">Form</option>
                    <option value="text">Text</option>
                </select>
            </div>
            <div id="requests"></div>
        </section>
    </main>

    <script>
        const $ = (id) => document.getElementById(id);

        function esc(s) {
            const div = document.createElement('div');
            div.textContent = s == null ? '' : String(s);
            return div.innerHTML;
        }

        async function refreshStats() {
            const stats = await fetch('/api/stats').then(r => r.json());
            $('stat-endpoints').textContent = stats.total_endpoints;
            $('stat-active').textContent = stats.active_endpoints;
            $('stat-requests').textContent = stats.total_requests;
            $('stat-today').textContent = stats.requests_today;
        }

        async function refreshEndpoints() {
            const endpoints = await fetch('/api/endpoints').then(r => r.json());
            const el = $('endpoints');
            if (!endpoints.length) {
                el.innerHTML = '<div class="empty">No endpoints yet. Create one to start capturing.</div>';
                return;
            }
            el.innerHTML = endpoints.map(ep => `
                <div class="endpoint">
                    <div>
                        <div class="url">${esc(ep.url)}</div>
                        <div class="meta">${ep.request_count}${ep.max_requests ? ' / ' + ep.max_requests : ''} requests
                            &middot; expires ${new Date(ep.expires_at).toLocaleString()}</div>
                    </div>
                    <span class="badge ${esc(ep.status)}">${esc(ep.status.replace('_', ' '))}</span>
                    <button class="danger" onclick="deleteEndpoint('${ep.id}')">Delete</button>
                </div>`).join('');
        }

        function filterQuery() {
            const params = new URLSearchParams();
            const search = $('f-search').value.trim();
            const method = $('f-method').value;
            const contentType = $('f-content-type').value;
            if (search) params.set('search', search);
            if (method) params.set('method', method);
            if (contentType) params.set('content_type', contentType);
            const qs = params.toString();
            return qs ? '?' + qs : '';
        }

        async function refreshRequests() {
            const requests = await fetch('/api/requests' + filterQuery()).then(r => r.json());
            const el = $('requests');
            if (!requests.length) {
                el.innerHTML = '<div class="empty">No captured requests match.</div>';
                return;
            }
            el.innerHTML = requests.map(req => `
                <div class="request">
                    <div class="request-row" onclick="toggle('${req.id}')">
                        <span class="method">${esc(req.method)}</span>
                        <span class="ip">${esc(req.ip_address)}</span>
                        <span>${esc(req.content_type)}</span>
                        <span class="when">${new Date(req.timestamp).toLocaleString()}</span>
                    </div>
                    <div class="request-detail" id="detail-${req.id}">
                        <h3>Headers</h3>
                        <pre>${esc(req.headers.map(h => h[0] + ': ' + h[1]).join('\n'))}</pre>
                        <h3>Body</h3>
                        <pre>${esc(req.body || '(empty)')}</pre>
                        <h3></h3>
                        <a href="/api/requests/${req.id}/export" download>
                            <button>Export JSON</button>
                        </a>
                    </div>
                </div>`).join('');
        }

        function toggle(id) {
            $('detail-' + id).classList.toggle('open');
        }

        async function deleteEndpoint(id) {
            await fetch('/api/endpoints/' + id, { method: 'DELETE' });
            refreshAll();
        }

        async function createEndpoint() {
            const ttl = parseInt($('ttl').value, 10) || 60;
            const max = parseInt($('max-requests').value, 10);
            await fetch('/api/endpoints', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({
                    ttl_minutes: ttl,
                    max_requests: Number.isFinite(max) ? max : null,
                }),
            });
            $('create-form').classList.remove('open');
            refreshAll();
        }

        function refreshAll() {
            refreshStats();
            refreshEndpoints();
            refreshRequests();
        }

        $('new-endpoint').onclick = () => $('create-form').classList.add('open');
        $('cancel').onclick = () => $('create-form').classList.remove('open');
        $('create').onclick = createEndpoint;
        $('clear-filters').onclick = () => {
            $('f-search').value = '';
            $('f-method').value = '';
            $('f-content-type').value = '';
            refreshRequests();
        };
        for (const id of ['f-search', 'f-method', 'f-content-type']) {
            $(id).addEventListener('input', refreshRequests);
        }

        // Live updates over WebSocket; fall back to visibility refreshes.
        function connect() {
            const proto = location.protocol === 'https:' ? 'wss' : 'ws';
            const ws = new WebSocket(proto + '://' + location.host + '/ws');
            ws.onopen = () => { $('conn').textContent = 'live'; $('conn').className = 'badge active'; };
            ws.onmessage = (msg) => {
                const event = JSON.parse(msg.data);
                if (event.type === 'request' || event.type === 'endpoint_removed') {
                    refreshAll();
                }
            };
            ws.onclose = () => {
                $('conn').textContent = 'offline';
                $('conn').className = 'badge expired';
                setTimeout(connect, 3000);
            };
        }

        refreshAll();
        connect();
    </script>
</body>
</html>
"#;
